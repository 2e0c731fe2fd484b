// src/protocols/digest.rs
//! Reduction of messages to the integer digest consumed by sign and verify.

use rug::Integer;
use sha2::{Digest, Sha256};

use crate::arithmetic::encoding::from_be_bytes;
use crate::params::CurveParams;

/// Hash function producing a fixed-length digest
pub trait MessageDigest {
    fn digest(&self, message: &[u8]) -> Vec<u8>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Digest;

impl MessageDigest for Sha256Digest {
    fn digest(&self, message: &[u8]) -> Vec<u8> {
        Sha256::digest(message).to_vec()
    }
}

/// Digest of `message` as an integer, truncated to the leftmost `scalar_bits` bits
pub fn hash_to_integer<D: MessageDigest + ?Sized>(
    hasher: &D,
    params: &CurveParams,
    message: &[u8],
) -> Integer {
    let digest = hasher.digest(message);
    let mut value = from_be_bytes(&digest);

    let digest_bits = (digest.len() * 8) as u32;
    if digest_bits > params.scalar_bits {
        value >>= digest_bits - params.scalar_bits;
    }
    value
}
