// src/protocols/mod.rs
//! Keys, nonce derivation, message digests and the ECDSA sign/verify protocol.

pub mod digest;
pub mod ecdsa;
pub mod keys;
pub mod nonce;

pub use digest::{hash_to_integer, MessageDigest, Sha256Digest};
pub use ecdsa::{
    is_on_curve, sign, sign_with, validate_signature_entry, verify, verify_batch,
    verify_detailed, Signature, VerificationOutcome,
};
pub use keys::{public_key_from_private, PrivateKey, PublicKey};
pub use nonce::{derive_nonce, AuxiliaryPointNonce, NonceSource, SystemRandomNonce};
