// src/protocols/ecdsa.rs
//! ECDSA signature generation and verification.
//!
//! Signing: k from a `NonceSource`, R = k·G, r = x(R) mod n, s = (h + r·d) / k mod n.
//! Verification: u1 = h / s, u2 = r / s, R' = u1·G + u2·Q, accept iff x(R') mod n = r.
//! Malformed but well-typed inputs never raise during verification; they yield a
//! `VerificationOutcome` other than `Valid`.

use log::{debug, warn};
use rug::Integer;
use std::thread;
use subtle::ConstantTimeEq;

use crate::arithmetic::encoding::{from_be_bytes, to_fixed_bytes};
use crate::arithmetic::modular::{add_mod, div_mod, mul_mod, normalize};
use crate::curves::{Curve, Point};
use crate::errors::{EcdsaError, ResultExt};
use crate::params::CurveParams;
use crate::protocols::keys::PrivateKey;
use crate::protocols::nonce::{AuxiliaryPointNonce, NonceSource};

/// ECDSA signature (r, s)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    r: Integer,
    s: Integer,
}

impl Signature {
    pub fn new(r: Integer, s: Integer) -> Self {
        Self { r, s }
    }

    pub fn r(&self) -> &Integer {
        &self.r
    }

    pub fn s(&self) -> &Integer {
        &self.s
    }

    /// Fixed-width big-endian r ‖ s
    pub fn to_bytes(&self, params: &CurveParams) -> Result<Vec<u8>, EcdsaError> {
        let len = params.byte_len();
        let out_of_range = || EcdsaError::ScalarOutOfRange {
            bits: self.r.significant_bits().max(self.s.significant_bits()),
            max_bits: params.scalar_bits,
        };
        let mut out = to_fixed_bytes(&self.r, len).ok_or_else(out_of_range)?;
        out.extend(to_fixed_bytes(&self.s, len).ok_or_else(out_of_range)?);
        Ok(out)
    }

    pub fn from_bytes(params: &CurveParams, bytes: &[u8]) -> Result<Self, EcdsaError> {
        let len = params.byte_len();
        if bytes.len() != 2 * len {
            return Err(EcdsaError::InvalidLength {
                expected: 2 * len,
                actual: bytes.len(),
                context: "signature".to_string(),
            });
        }
        let (r, s) = bytes.split_at(len);
        Ok(Self::new(from_be_bytes(r), from_be_bytes(s)))
    }
}

/// Result of checking a signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    Valid,
    /// The public key is not a point on the curve
    InvalidPublicKey,
    /// r or s lies outside [1, n)
    InvalidSignatureRange,
    /// The recomputed x-coordinate differs from r
    SignatureMismatch,
}

impl VerificationOutcome {
    pub fn is_valid(self) -> bool {
        self == VerificationOutcome::Valid
    }
}

/// Sign `msg_hash` with the auxiliary-point nonce
///
/// The auxiliary points are fixed secp256r1 points, so on any other curve
/// (including the `CurveId::Secp256k1` preset) this fails with `InvalidPoint`.
/// Use `sign_with` there, with `SystemRandomNonce` or an `AuxiliaryPointNonce`
/// built from points on that curve.
pub fn sign(
    curve: &Curve,
    private_key: &PrivateKey,
    msg_hash: &Integer,
) -> Result<Signature, EcdsaError> {
    sign_with(curve, private_key, msg_hash, &AuxiliaryPointNonce::secp256r1())
}

/// Sign `msg_hash` with a caller-chosen nonce source
///
/// A nonce that is zero modulo n, or that yields r = 0 or s = 0, fails with
/// `DegenerateNonce`; retrying needs a source that can produce a different k.
pub fn sign_with(
    curve: &Curve,
    private_key: &PrivateKey,
    msg_hash: &Integer,
    nonce_source: &dyn NonceSource,
) -> Result<Signature, EcdsaError> {
    let params = curve.params();
    let n = &params.n;
    let d = private_key.scalar();
    debug!("signing on {}", params.name);

    let k = normalize(&nonce_source.nonce(curve, msg_hash, &d)?, n);
    if k == 0 {
        return Err(EcdsaError::DegenerateNonce).log_on_error(
            module_path!(),
            "sign_with",
            line!(),
        );
    }

    let big_r = curve.mult(curve.generator(), &k)?;
    let r = match big_r.x() {
        Some(x) => normalize(x, n),
        None => return Err(EcdsaError::DegenerateNonce),
    };
    if r == 0 {
        return Err(EcdsaError::DegenerateNonce).log_on_error(
            module_path!(),
            "sign_with",
            line!(),
        );
    }

    let r_d = mul_mod(&r, &d, n);
    let numerator = add_mod(msg_hash, &r_d, n);
    let s = div_mod(&numerator, &k, n)?;
    if s == 0 {
        return Err(EcdsaError::DegenerateNonce).log_on_error(
            module_path!(),
            "sign_with",
            line!(),
        );
    }

    Ok(Signature::new(r, s))
}

/// Check that a signature component lies in [1, n)
pub fn validate_signature_entry(value: &Integer, n: &Integer) -> bool {
    *value >= 1 && *value < *n
}

/// Verify a signature, reporting why it was rejected
///
/// Only arithmetic faults that range validation cannot exclude surface as errors.
pub fn verify_detailed(
    curve: &Curve,
    public_key: &Point,
    msg_hash: &Integer,
    signature: &Signature,
) -> Result<VerificationOutcome, EcdsaError> {
    let params = curve.params();
    let n = &params.n;
    debug!("verifying signature on {}", params.name);

    if !curve.verify_point(public_key) {
        warn!("signature rejected: public key not on {}", params.name);
        return Ok(VerificationOutcome::InvalidPublicKey);
    }
    if !validate_signature_entry(&signature.r, n) || !validate_signature_entry(&signature.s, n) {
        warn!("signature rejected: r or s outside [1, n)");
        return Ok(VerificationOutcome::InvalidSignatureRange);
    }

    let u1 = div_mod(msg_hash, &signature.s, n)?;
    let u2 = div_mod(&signature.r, &signature.s, n)?;

    let gen_u1 = curve.mult(curve.generator(), &u1)?;
    let pub_u2 = curve.mult(public_key, &u2)?;
    let recovered = curve.ec_add(&gen_u1, &pub_u2)?;

    // The identity has no x-coordinate and never matches
    let x = match recovered.x() {
        Some(x) => normalize(x, n),
        None => return Ok(VerificationOutcome::SignatureMismatch),
    };

    let len = params.byte_len();
    let matches = match (to_fixed_bytes(&x, len), to_fixed_bytes(&signature.r, len)) {
        (Some(x_bytes), Some(r_bytes)) => {
            bool::from(x_bytes.as_slice().ct_eq(r_bytes.as_slice()))
        }
        _ => false,
    };

    if matches {
        Ok(VerificationOutcome::Valid)
    } else {
        Ok(VerificationOutcome::SignatureMismatch)
    }
}

/// Verify a signature; any failure, including arithmetic faults, reads as `false`
pub fn verify(
    curve: &Curve,
    public_key: &Point,
    msg_hash: &Integer,
    signature: &Signature,
) -> bool {
    verify_detailed(curve, public_key, msg_hash, signature)
        .log_on_error(module_path!(), "verify", line!())
        .map(VerificationOutcome::is_valid)
        .unwrap_or(false)
}

/// Verify independent (public key, digest, signature) triples on scoped threads
///
/// Only the read-only curve parameters are shared between workers.
pub fn verify_batch(curve: &Curve, items: &[(Point, Integer, Signature)]) -> Vec<bool> {
    if items.is_empty() {
        return Vec::new();
    }
    let workers = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(items.len());
    let chunk_size = (items.len() + workers - 1) / workers;

    thread::scope(|scope| {
        let handles: Vec<_> = items
            .chunks(chunk_size)
            .map(|chunk| {
                let handle = scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|(public_key, msg_hash, signature)| {
                            verify(curve, public_key, msg_hash, signature)
                        })
                        .collect::<Vec<bool>>()
                });
                (chunk.len(), handle)
            })
            .collect();

        // A worker that panicked rejects its whole chunk
        handles
            .into_iter()
            .flat_map(|(len, handle)| handle.join().unwrap_or_else(|_| vec![false; len]))
            .collect()
    })
}

/// Whether `point` satisfies the curve equation
pub fn is_on_curve(curve: &Curve, point: &Point) -> bool {
    curve.verify_point(point)
}
