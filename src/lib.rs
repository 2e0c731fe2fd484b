// src/lib.rs
//! ECDSA over short-Weierstrass prime curves y² = x³ + Ax + B (mod P).
//!
//! The crate is organised bottom-up: modular arithmetic on `rug::Integer`, the affine
//! group law and scalar multiplication, then nonce derivation and the sign/verify
//! protocol. Curve parameters are immutable values passed to every operation.
//!
//! ```no_run
//! use miniecdsa::{params::CurveParams, curves::Curve, protocols::{ecdsa, keys::PrivateKey}};
//!
//! let params = CurveParams::global();
//! let curve = Curve::new(params);
//! let sk = PrivateKey::generate(params).expect("entropy");
//! let pk = sk.public_key(&curve).expect("public key");
//! let digest = rug::Integer::from(0xC0FFEE);
//! let sig = ecdsa::sign(&curve, &sk, &digest).expect("signature");
//! assert!(ecdsa::verify(&curve, pk.point(), &digest, &sig));
//! ```

pub mod arithmetic;
pub mod curves;
pub mod errors;
pub mod params;
pub mod protocols;

pub use curves::{Curve, Point};
pub use errors::EcdsaError;
pub use params::{CurveId, CurveParams};
pub use protocols::ecdsa::{Signature, VerificationOutcome};
