// src/arithmetic/encoding.rs
//! Fixed-width big-endian encoding of non-negative integers.

use rug::{integer::Order, Integer};

/// Big-endian bytes of `value`, left-padded with zeros to `len` bytes
///
/// Returns `None` when the value is negative or does not fit.
pub fn to_fixed_bytes(value: &Integer, len: usize) -> Option<Vec<u8>> {
    if *value < 0 {
        return None;
    }
    let digits = value.to_digits::<u8>(Order::Msf);
    if digits.len() > len {
        return None;
    }
    let mut out = vec![0u8; len - digits.len()];
    out.extend_from_slice(&digits);
    Some(out)
}

/// Interpret big-endian bytes as a non-negative integer
pub fn from_be_bytes(bytes: &[u8]) -> Integer {
    Integer::from_digits(bytes, Order::Msf)
}
