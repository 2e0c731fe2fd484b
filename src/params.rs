// src/params.rs
//! Domain parameters for short-Weierstrass curves y² = x³ + Ax + B over a prime field.
//! Parameters are immutable values: every arithmetic and protocol operation receives
//! them by reference, so several curves can be used side by side in one process.

use rug::Integer;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

use crate::arithmetic::modular::{add_mod, mul_mod};
use crate::curves::Point;

/// Error types for parameter construction and validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("Malformed hexadecimal value for parameter '{parameter}'")]
    MalformedHex { parameter: String },

    #[error("Parameter '{parameter}' is not prime")]
    NotPrime { parameter: String },

    #[error("Group order must be odd: n = {value}")]
    EvenOrder { value: Integer },

    #[error("Singular curve: 4A³ + 27B² ≡ 0 (mod p)")]
    SingularCurve,

    #[error("Generator ({x}, {y}) does not lie on the curve")]
    GeneratorOffCurve { x: Integer, y: Integer },

    #[error("Parameter '{parameter}' is {actual} bits wide, at most {max} supported")]
    TooWide {
        parameter: String,
        actual: u32,
        max: u32,
    },

    #[error("Unknown curve name '{name}'")]
    UnknownCurve { name: String },
}

/// Named curve presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveId {
    /// NIST P-256, also known as prime256v1
    Secp256r1,
    /// The Koblitz curve y² = x³ + 7 used by Bitcoin
    Secp256k1,
}

impl CurveId {
    pub fn params(self) -> CurveParams {
        match self {
            CurveId::Secp256r1 => CurveParams::secp256r1(),
            CurveId::Secp256k1 => CurveParams::secp256k1(),
        }
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CurveId::Secp256r1 => write!(f, "secp256r1"),
            CurveId::Secp256k1 => write!(f, "secp256k1"),
        }
    }
}

impl FromStr for CurveId {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "secp256r1" | "p256" | "p-256" | "prime256v1" => Ok(CurveId::Secp256r1),
            "secp256k1" => Ok(CurveId::Secp256k1),
            _ => Err(ParamsError::UnknownCurve {
                name: s.to_string(),
            }),
        }
    }
}

/// Curve domain parameters (p, n, A, B, G)
///
/// `scalar_bits` is the width of the field prime. Scalar multiplication always runs
/// exactly that many double-and-add steps, whatever the magnitude of the scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveParams {
    /// Human readable curve name
    pub name: String,
    /// Field prime
    pub p: Integer,
    /// Order of the generator (and of the whole group, cofactor 1)
    pub n: Integer,
    /// Coefficient A
    pub a: Integer,
    /// Coefficient B
    pub b: Integer,
    /// Base point G
    pub generator: Point,
    /// Fixed iteration count of the scalar multiplication ladder
    pub scalar_bits: u32,
}

impl CurveParams {
    /// Build parameters from big-endian hexadecimal strings
    pub fn from_hex(
        name: &str,
        p: &str,
        n: &str,
        a: &str,
        b: &str,
        gx: &str,
        gy: &str,
    ) -> Result<Self, ParamsError> {
        let p = parse_hex("p", p)?;
        let n = parse_hex("n", n)?;
        let a = parse_hex("a", a)?;
        let b = parse_hex("b", b)?;
        let gx = parse_hex("gx", gx)?;
        let gy = parse_hex("gy", gy)?;
        let scalar_bits = p.significant_bits();

        Ok(Self {
            name: name.to_string(),
            p,
            n,
            a,
            b,
            generator: Point::affine(gx, gy),
            scalar_bits,
        })
    }

    /// NIST P-256
    pub fn secp256r1() -> Self {
        Self::from_hex(
            "secp256r1",
            "FFFFFFFF00000001000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFF",
            "FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551",
            "FFFFFFFF00000001000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFC",
            "5AC635D8AA3A93E7B3EBBD55769886BC651D06B0CC53B0F63BCE3C3E27D2604B",
            "6B17D1F2E12C4247F8BCE6E563A440F277037D812DEB33A0F4A13945D898C296",
            "4FE342E2FE1A7F9B8EE7EB4A7C0F9E162BCE33576B315ECECBB6406837BF51F5",
        )
        .unwrap_or_else(|e| unreachable!("built-in secp256r1 constants: {}", e))
    }

    /// secp256k1
    pub fn secp256k1() -> Self {
        Self::from_hex(
            "secp256k1",
            "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
            "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141",
            "0000000000000000000000000000000000000000000000000000000000000000",
            "0000000000000000000000000000000000000000000000000000000000000007",
            "79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798",
            "483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8",
        )
        .unwrap_or_else(|e| unreachable!("built-in secp256k1 constants: {}", e))
    }

    /// Process-wide secp256r1 instance (lazy initialization)
    ///
    /// The instance is validated once on first use and shared read-only afterwards.
    pub fn global() -> &'static Self {
        static INSTANCE: OnceLock<CurveParams> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let params = Self::secp256r1();
            params
                .validate()
                .expect("Built-in secp256r1 parameters failed validation");
            params
        })
    }

    /// Byte length of a field element or scalar in fixed-width encodings
    pub fn byte_len(&self) -> usize {
        ((self.scalar_bits + 7) / 8) as usize
    }

    /// Validate the parameters against the shape this crate supports
    ///
    /// Checks primality of p and n, odd group order (no point has y = 0), a
    /// non-singular curve, the generator on the curve, and that n fits the
    /// scalar multiplication width.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !is_prime(&self.p) {
            return Err(ParamsError::NotPrime {
                parameter: "p".to_string(),
            });
        }
        if !is_prime(&self.n) {
            return Err(ParamsError::NotPrime {
                parameter: "n".to_string(),
            });
        }
        if self.n.is_even() {
            return Err(ParamsError::EvenOrder {
                value: self.n.clone(),
            });
        }

        let n_bits = self.n.significant_bits();
        if n_bits > self.scalar_bits {
            return Err(ParamsError::TooWide {
                parameter: "n".to_string(),
                actual: n_bits,
                max: self.scalar_bits,
            });
        }

        // 4A³ + 27B²
        let a_cube = mul_mod(&mul_mod(&self.a, &self.a, &self.p), &self.a, &self.p);
        let b_sqr = mul_mod(&self.b, &self.b, &self.p);
        let discriminant = add_mod(
            &mul_mod(&Integer::from(4), &a_cube, &self.p),
            &mul_mod(&Integer::from(27), &b_sqr, &self.p),
            &self.p,
        );
        if discriminant == 0 {
            return Err(ParamsError::SingularCurve);
        }

        match &self.generator {
            Point::Affine { x, y } if self.satisfies_equation(x, y) => Ok(()),
            Point::Affine { x, y } => Err(ParamsError::GeneratorOffCurve {
                x: x.clone(),
                y: y.clone(),
            }),
            Point::Identity => Err(ParamsError::GeneratorOffCurve {
                x: Integer::new(),
                y: Integer::new(),
            }),
        }
    }

    /// y² ≡ x³ + Ax + B (mod p)
    pub(crate) fn satisfies_equation(&self, x: &Integer, y: &Integer) -> bool {
        let y_sqr = mul_mod(y, y, &self.p);
        let x_sqr = mul_mod(x, x, &self.p);
        let x_cub = mul_mod(&x_sqr, x, &self.p);
        let a_x = mul_mod(&self.a, x, &self.p);
        let right = add_mod(&add_mod(&x_cub, &a_x, &self.p), &self.b, &self.p);
        y_sqr == right
    }
}

fn parse_hex(parameter: &str, value: &str) -> Result<Integer, ParamsError> {
    let trimmed = value.trim_start_matches("0x").trim_start_matches("0X");
    Integer::from_str_radix(trimmed, 16).map_err(|_| ParamsError::MalformedHex {
        parameter: parameter.to_string(),
    })
}

/// Miller-Rabin with the first twelve prime bases
fn is_prime(n: &Integer) -> bool {
    if *n <= 1 {
        return false;
    }
    if *n <= 3 {
        return true;
    }
    if n.is_even() {
        return false;
    }

    const BASES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

    // n - 1 = d * 2^s
    let n_minus_one = Integer::from(n - 1);
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1u32;
        s += 1;
    }

    'bases: for base in BASES {
        let base = Integer::from(base);
        if base >= *n {
            continue;
        }

        let mut x = match base.pow_mod(&d, n) {
            Ok(x) => x,
            Err(_) => return false,
        };
        if x == 1 || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x.square_mut();
            x %= n;
            if x == n_minus_one {
                continue 'bases;
            }
        }
        return false;
    }

    true
}
