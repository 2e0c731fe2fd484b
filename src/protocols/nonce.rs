// src/protocols/nonce.rs
//! Per-signature nonce sources.
//!
//! `AuxiliaryPointNonce` reproduces the deterministic two-point construction
//! k = (x(h·P1) + x(d·P2)) mod n. It is not RFC 6979 and its soundness rests on
//! the choice of P1 and P2; it exists for compatibility with signatures produced
//! by that scheme. `SystemRandomNonce` draws k from the operating system instead.

use log::debug;
use rug::Integer;

use crate::arithmetic::modular::add_mod;
use crate::curves::{Curve, Point};
use crate::errors::EcdsaError;
use crate::protocols::keys::random_scalar;

/// Source of the per-signature scalar k
pub trait NonceSource {
    /// Produce a nonce for signing `msg_hash` with `private_key`
    fn nonce(
        &self,
        curve: &Curve,
        msg_hash: &Integer,
        private_key: &Integer,
    ) -> Result<Integer, EcdsaError>;
}

/// Deterministic nonce from two fixed auxiliary base points
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuxiliaryPointNonce {
    first: Point,
    second: Point,
}

impl AuxiliaryPointNonce {
    /// Build from two points, both of which must lie on `curve`
    pub fn new(curve: &Curve, first: Point, second: Point) -> Result<Self, EcdsaError> {
        let nonce = Self { first, second };
        nonce.check_points(curve)?;
        Ok(nonce)
    }

    /// The auxiliary points used with secp256r1
    pub fn secp256r1() -> Self {
        Self {
            first: Point::affine(
                hex_constant("53b907251bc1ceb7ab0eb41323afb7126600fe4cb2a9a2e8a797127508f97009"),
                hex_constant("c7b390484e2baae92df41f50e537e57185cb18017650a6d3220a42a97727217d"),
            ),
            second: Point::affine(
                hex_constant("acbc2999fb58c6e9015a12a4c5f3849e301649b2271eaaaf21906ed03cafdf45"),
                hex_constant("146aac3f7f74047fd45cf0098fadee5cd00f7f6871440387ba402f2390d7276f"),
            ),
        }
    }

    pub fn points(&self) -> (&Point, &Point) {
        (&self.first, &self.second)
    }

    fn check_points(&self, curve: &Curve) -> Result<(), EcdsaError> {
        if !curve.verify_point(&self.first) || !curve.verify_point(&self.second) {
            return Err(EcdsaError::InvalidPoint {
                context: format!("auxiliary nonce points not on {}", curve.params().name),
            });
        }
        Ok(())
    }
}

impl NonceSource for AuxiliaryPointNonce {
    fn nonce(
        &self,
        curve: &Curve,
        msg_hash: &Integer,
        private_key: &Integer,
    ) -> Result<Integer, EcdsaError> {
        self.check_points(curve)?;

        let from_message = curve.mult(&self.first, msg_hash)?;
        let from_key = curve.mult(&self.second, private_key)?;

        // The identity contributes x = 0
        let (message_x, _) = from_message.to_legacy();
        let (key_x, _) = from_key.to_legacy();

        debug!("derived auxiliary-point nonce on {}", curve.params().name);
        Ok(add_mod(&message_x, &key_x, &curve.params().n))
    }
}

/// Uniformly random nonce in [1, n) from the operating system entropy source
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRandomNonce;

impl NonceSource for SystemRandomNonce {
    fn nonce(
        &self,
        curve: &Curve,
        _msg_hash: &Integer,
        _private_key: &Integer,
    ) -> Result<Integer, EcdsaError> {
        random_scalar(curve.params())
    }
}

/// Nonce for (msg_hash, privkey) using the secp256r1 auxiliary points
pub fn derive_nonce(
    curve: &Curve,
    msg_hash: &Integer,
    privkey: &Integer,
) -> Result<Integer, EcdsaError> {
    AuxiliaryPointNonce::secp256r1().nonce(curve, msg_hash, privkey)
}

fn hex_constant(value: &str) -> Integer {
    Integer::from_str_radix(value, 16)
        .unwrap_or_else(|e| unreachable!("built-in nonce constant: {}", e))
}
