// src/curves/point.rs
//! Affine curve points with an explicit identity element.

use rug::{integer::Order, Integer};
use std::cmp::Ordering;
use subtle::{Choice, ConstantTimeEq};

/// Point on a short-Weierstrass curve in affine coordinates
///
/// The point at infinity is its own variant, so a real point with x = 0 is never
/// mistaken for the identity.
#[derive(Clone, Debug)]
pub enum Point {
    /// Neutral element of the group
    Identity,
    /// Affine coordinates, each in [0, p)
    Affine { x: Integer, y: Integer },
}

impl Point {
    pub fn identity() -> Self {
        Point::Identity
    }

    pub fn affine(x: Integer, y: Integer) -> Self {
        Point::Affine { x, y }
    }

    /// Decode the (x, y) pair encoding where (0, 0) stands for the identity
    pub fn from_legacy(x: Integer, y: Integer) -> Self {
        if x == 0 && y == 0 {
            Point::Identity
        } else {
            Point::Affine { x, y }
        }
    }

    /// Encode as an (x, y) pair, mapping the identity to (0, 0)
    pub fn to_legacy(&self) -> (Integer, Integer) {
        match self {
            Point::Identity => (Integer::new(), Integer::new()),
            Point::Affine { x, y } => (x.clone(), y.clone()),
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Point::Identity)
    }

    pub fn x(&self) -> Option<&Integer> {
        match self {
            Point::Identity => None,
            Point::Affine { x, .. } => Some(x),
        }
    }

    pub fn y(&self) -> Option<&Integer> {
        match self {
            Point::Identity => None,
            Point::Affine { y, .. } => Some(y),
        }
    }
}

/// Equality compares coordinate values exactly: a negative coordinate never equals
/// its absolute value, and x + p is a different point from x. Group operations only
/// produce coordinates in [0, p), so canonical points compare as expected.
impl ConstantTimeEq for Point {
    fn ct_eq(&self, other: &Self) -> Choice {
        match (self, other) {
            (Point::Identity, Point::Identity) => Choice::from(1),
            (Point::Affine { x: x0, y: y0 }, Point::Affine { x: x1, y: y1 }) => {
                coordinate_ct_eq(x0, x1) & coordinate_ct_eq(y0, y1)
            }
            _ => Choice::from(0),
        }
    }
}

/// Sign byte followed by the magnitude, left-padded to a shared width
fn coordinate_ct_eq(a: &Integer, b: &Integer) -> Choice {
    let width = (a.significant_bits().max(b.significant_bits()) as usize + 7) / 8;
    signed_bytes(a, width)
        .as_slice()
        .ct_eq(signed_bytes(b, width).as_slice())
}

fn signed_bytes(value: &Integer, width: usize) -> Vec<u8> {
    let digits = value.to_digits::<u8>(Order::Msf);
    let mut out = vec![0u8; width + 1];
    out[0] = u8::from(value.cmp0() == Ordering::Less);
    out[1 + width - digits.len()..].copy_from_slice(&digits);
    out
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Point {}
