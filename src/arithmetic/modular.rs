// src/arithmetic/modular.rs
//! Modular arithmetic on arbitrary-precision integers.
//!
//! Every result is normalized into [0, m). Inputs may be negative or exceed the
//! modulus; they are reduced first. Division is multiplication by the modular
//! inverse and is the only fallible operation.

use rug::Integer;

use crate::errors::EcdsaError;

/// Reduce `x` into the canonical range [0, m)
pub fn normalize(x: &Integer, m: &Integer) -> Integer {
    let mut reduced = Integer::from(x % m);
    if reduced < 0 {
        reduced += m;
    }
    reduced
}

/// (x + y) mod m
pub fn add_mod(x: &Integer, y: &Integer, m: &Integer) -> Integer {
    normalize(&Integer::from(x + y), m)
}

/// (x - y) mod m
pub fn sub_mod(x: &Integer, y: &Integer, m: &Integer) -> Integer {
    normalize(&Integer::from(x - y), m)
}

/// (x · y) mod m
pub fn mul_mod(x: &Integer, y: &Integer, m: &Integer) -> Integer {
    normalize(&Integer::from(x * y), m)
}

/// (-x) mod m
pub fn neg_mod(x: &Integer, m: &Integer) -> Integer {
    normalize(&Integer::from(-x), m)
}

/// (x · y⁻¹) mod m
///
/// Fails with `NoInverse` when gcd(y, m) ≠ 1, which includes y ≡ 0.
pub fn div_mod(x: &Integer, y: &Integer, m: &Integer) -> Result<Integer, EcdsaError> {
    let inverse = normalize(y, m)
        .invert(m)
        .map_err(|_| EcdsaError::NoInverse {
            operation: "div_mod".to_string(),
            modulus_bits: m.significant_bits(),
        })?;
    Ok(mul_mod(x, &inverse, m))
}
