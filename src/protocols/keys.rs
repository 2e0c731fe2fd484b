// src/protocols/keys.rs
//! Private and public keys.
//!
//! Private scalars are kept as fixed-width big-endian bytes inside `Zeroizing`
//! buffers and materialised as integers only for the duration of an operation.

use getrandom::getrandom;
use log::debug;
use rug::Integer;
use std::fmt;
use zeroize::Zeroizing;

use crate::arithmetic::encoding::{from_be_bytes, to_fixed_bytes};
use crate::curves::{Curve, Point};
use crate::errors::EcdsaError;
use crate::params::CurveParams;

/// Upper bound on rejection-sampling rounds; each round succeeds with probability > 1/2
const MAX_SAMPLING_ATTEMPTS: usize = 128;

/// Private signing key: a scalar in [1, n)
#[derive(Clone)]
pub struct PrivateKey {
    bytes: Zeroizing<Vec<u8>>,
}

impl PrivateKey {
    /// Wrap a scalar, rejecting values outside [1, n)
    pub fn from_integer(params: &CurveParams, scalar: &Integer) -> Result<Self, EcdsaError> {
        if *scalar < 1 || *scalar >= params.n {
            return Err(EcdsaError::InvalidPrivateKey {
                reason: "scalar outside [1, n)".to_string(),
            });
        }
        let bytes = to_fixed_bytes(scalar, params.byte_len()).ok_or_else(|| {
            EcdsaError::InvalidPrivateKey {
                reason: "scalar wider than the curve".to_string(),
            }
        })?;
        Ok(Self {
            bytes: Zeroizing::new(bytes),
        })
    }

    /// Decode a big-endian scalar
    pub fn from_bytes(params: &CurveParams, bytes: &[u8]) -> Result<Self, EcdsaError> {
        if bytes.len() != params.byte_len() {
            return Err(EcdsaError::InvalidPrivateKey {
                reason: format!("expected {} bytes, got {}", params.byte_len(), bytes.len()),
            });
        }
        Self::from_integer(params, &from_be_bytes(bytes))
    }

    /// Draw a uniformly random key from the operating system entropy source
    pub fn generate(params: &CurveParams) -> Result<Self, EcdsaError> {
        let scalar = random_scalar(params)?;
        debug!("generated private key on {}", params.name);
        Self::from_integer(params, &scalar)
    }

    pub fn scalar(&self) -> Integer {
        from_be_bytes(&self.bytes)
    }

    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        self.bytes.clone()
    }

    pub fn public_key(&self, curve: &Curve) -> Result<PublicKey, EcdsaError> {
        let point = public_key_from_private(curve, &self.scalar())?;
        Ok(PublicKey { point })
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

/// Public verification key: a validated point on the curve
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    point: Point,
}

impl PublicKey {
    pub fn from_point(curve: &Curve, point: Point) -> Result<Self, EcdsaError> {
        if !curve.verify_point(&point) {
            return Err(EcdsaError::InvalidPoint {
                context: "public key not on curve".to_string(),
            });
        }
        Ok(Self { point })
    }

    pub fn from_coordinates(curve: &Curve, x: Integer, y: Integer) -> Result<Self, EcdsaError> {
        Self::from_point(curve, Point::affine(x, y))
    }

    pub fn point(&self) -> &Point {
        &self.point
    }
}

/// private_key · G
pub fn public_key_from_private(curve: &Curve, private_key: &Integer) -> Result<Point, EcdsaError> {
    curve.mult(curve.generator(), private_key)
}

/// Uniform scalar in [1, n) by masked rejection sampling
pub(crate) fn random_scalar(params: &CurveParams) -> Result<Integer, EcdsaError> {
    let n_bits = params.n.significant_bits() as usize;
    let len = (n_bits + 7) / 8;
    let excess_bits = len * 8 - n_bits;

    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        let mut buf = Zeroizing::new(vec![0u8; len]);
        getrandom(&mut buf[..]).map_err(|e| EcdsaError::EntropyUnavailable {
            reason: e.to_string(),
        })?;
        buf[0] &= 0xffu8 >> excess_bits;

        let candidate = from_be_bytes(&buf);
        if candidate >= 1 && candidate < params.n {
            return Ok(candidate);
        }
    }

    Err(EcdsaError::EntropyUnavailable {
        reason: format!("no scalar below n after {} attempts", MAX_SAMPLING_ATTEMPTS),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_key_range() {
        let params = CurveParams::global();

        assert!(PrivateKey::from_integer(params, &Integer::new()).is_err());
        assert!(PrivateKey::from_integer(params, &params.n).is_err());
        assert!(PrivateKey::from_integer(params, &Integer::from(-5)).is_err());

        let max = Integer::from(&params.n - 1);
        let key = PrivateKey::from_integer(params, &max).expect("n - 1 is a valid key");
        assert_eq!(key.scalar(), max);
        assert_eq!(key.to_bytes().len(), 32);
    }

    #[test]
    fn test_private_key_bytes() {
        let params = CurveParams::global();
        let mut bytes = [0u8; 32];
        bytes[31] = 7;

        let key = PrivateKey::from_bytes(params, &bytes).expect("7 is a valid key");
        assert_eq!(key.scalar(), 7);
        assert_eq!(&key.to_bytes()[..], &bytes[..]);
        assert!(PrivateKey::from_bytes(params, &bytes[1..]).is_err());
    }

    #[test]
    fn test_debug_output_is_redacted() {
        let params = CurveParams::global();
        let key = PrivateKey::from_integer(params, &Integer::from(0x1234_5678)).expect("valid");
        let rendered = format!("{:?}", key);
        assert_eq!(rendered, "PrivateKey([REDACTED])");
    }

    #[test]
    fn test_generated_keys_are_distinct_and_in_range() {
        let params = CurveParams::global();
        let a = PrivateKey::generate(params).expect("entropy available");
        let b = PrivateKey::generate(params).expect("entropy available");

        assert_ne!(a.scalar(), b.scalar());
        for key in [&a, &b] {
            assert!(key.scalar() >= 1);
            assert!(key.scalar() < params.n);
        }
    }

    #[test]
    fn test_public_key_of_one_is_generator() {
        let params = CurveParams::global();
        let curve = Curve::new(params);
        let key = PrivateKey::from_integer(params, &Integer::from(1)).expect("valid");

        let public = key.public_key(&curve).expect("public key");
        assert_eq!(public.point(), curve.generator());
    }

    #[test]
    fn test_public_key_validation() {
        let curve = Curve::new(CurveParams::global());
        assert!(PublicKey::from_coordinates(&curve, Integer::new(), Integer::from(1)).is_err());
        assert!(PublicKey::from_point(&curve, Point::Identity).is_err());
        assert!(PublicKey::from_point(&curve, curve.generator().clone()).is_ok());
    }
}
