// src/curves/elliptic_curve.rs
//! Group law on short-Weierstrass curves y² = x³ + Ax + B in affine coordinates.
//! This module provides the slope computations, doubling, the fast and total
//! addition paths, negation, the on-curve check and fixed-width scalar multiplication.

use log::trace;
use rug::Integer;

use crate::arithmetic::modular::{add_mod, div_mod, mul_mod, neg_mod, sub_mod};
use crate::curves::point::Point;
use crate::errors::EcdsaError;
use crate::params::CurveParams;

/// Elliptic curve view over a set of domain parameters
#[derive(Clone, Copy, Debug)]
pub struct Curve<'a> {
    params: &'a CurveParams,
}

impl<'a> Curve<'a> {
    pub fn new(params: &'a CurveParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &'a CurveParams {
        self.params
    }

    pub fn generator(&self) -> &'a Point {
        &self.params.generator
    }

    /// Slope of the tangent at `pt`: (3x² + A) / 2y
    ///
    /// y is never zero on an odd-order curve: such a point would satisfy pt = -pt,
    /// giving an element of order two.
    pub fn compute_doubling_slope(&self, pt: &Point) -> Result<Integer, EcdsaError> {
        let (x, y) = affine_coordinates(pt, "compute_doubling_slope")?;
        let p = &self.params.p;

        let x_sqr = mul_mod(x, x, p);
        let numerator = add_mod(&mul_mod(&Integer::from(3), &x_sqr, p), &self.params.a, p);
        let denominator = add_mod(y, y, p);

        div_mod(&numerator, &denominator, p).map_err(|_| self.no_inverse("compute_doubling_slope"))
    }

    /// Slope of the chord through `pt0` and `pt1`: (y0 - y1) / (x0 - x1)
    ///
    /// Requires x0 ≠ x1 (mod p).
    pub fn compute_slope(&self, pt0: &Point, pt1: &Point) -> Result<Integer, EcdsaError> {
        let (x0, y0) = affine_coordinates(pt0, "compute_slope")?;
        let (x1, y1) = affine_coordinates(pt1, "compute_slope")?;
        let p = &self.params.p;

        let x_diff = sub_mod(x0, x1, p);
        let y_diff = sub_mod(y0, y1, p);

        div_mod(&y_diff, &x_diff, p).map_err(|_| self.no_inverse("compute_slope"))
    }

    /// pt + pt
    pub fn ec_double(&self, pt: &Point) -> Result<Point, EcdsaError> {
        let (x, y) = match pt {
            Point::Identity => return Ok(Point::Identity),
            Point::Affine { x, y } => (x, y),
        };
        let p = &self.params.p;

        let slope = self.compute_doubling_slope(pt)?;
        let slope_sqr = mul_mod(&slope, &slope, p);

        let new_x = sub_mod(&slope_sqr, &add_mod(x, x, p), p);
        let new_y = sub_mod(&mul_mod(&slope, &sub_mod(x, &new_x, p), p), y, p);

        Ok(Point::affine(new_x, new_y))
    }

    /// pt0 + pt1 for points with distinct x-coordinates
    ///
    /// Either operand may be the identity. When x0 ≡ x1 the chord slope is
    /// undefined and `NoInverse` is returned; use `ec_add` for those inputs.
    pub fn fast_ec_add(&self, pt0: &Point, pt1: &Point) -> Result<Point, EcdsaError> {
        let (x0, y0, x1) = match (pt0, pt1) {
            (Point::Identity, _) => return Ok(pt1.clone()),
            (_, Point::Identity) => return Ok(pt0.clone()),
            (Point::Affine { x: x0, y: y0 }, Point::Affine { x: x1, .. }) => (x0, y0, x1),
        };
        let p = &self.params.p;

        let slope = self.compute_slope(pt0, pt1)?;
        let slope_sqr = mul_mod(&slope, &slope, p);

        let new_x = sub_mod(&sub_mod(&slope_sqr, x0, p), x1, p);
        let new_y = sub_mod(&mul_mod(&slope, &sub_mod(x0, &new_x, p), p), y0, p);

        Ok(Point::affine(new_x, new_y))
    }

    /// pt0 + pt1 for any pair of points
    ///
    /// Coincident x-coordinates are either mutual negatives (result is the
    /// identity) or the same point (result is the double).
    pub fn ec_add(&self, pt0: &Point, pt1: &Point) -> Result<Point, EcdsaError> {
        let (x0, y0, x1, y1) = match (pt0, pt1) {
            (Point::Identity, _) => return Ok(pt1.clone()),
            (_, Point::Identity) => return Ok(pt0.clone()),
            (Point::Affine { x: x0, y: y0 }, Point::Affine { x: x1, y: y1 }) => (x0, y0, x1, y1),
        };
        let p = &self.params.p;

        if sub_mod(x0, x1, p) != 0 {
            return self.fast_ec_add(pt0, pt1);
        }

        if add_mod(y0, y1, p) == 0 {
            Ok(Point::Identity)
        } else {
            self.ec_double(pt0)
        }
    }

    /// (x, y) -> (x, -y)
    pub fn ec_neg(&self, pt: &Point) -> Point {
        match pt {
            Point::Identity => Point::Identity,
            Point::Affine { x, y } => Point::affine(x.clone(), neg_mod(y, &self.params.p)),
        }
    }

    /// y² ≡ x³ + Ax + B (mod p)
    ///
    /// The identity has no affine coordinates and is reported as not on the
    /// curve, so it can never pass as a public key.
    pub fn verify_point(&self, pt: &Point) -> bool {
        match pt {
            Point::Identity => false,
            Point::Affine { x, y } => {
                let p = &self.params.p;
                if *x < 0 || *x >= *p || *y < 0 || *y >= *p {
                    return false;
                }
                self.params.satisfies_equation(x, y)
            }
        }
    }

    /// r · pt by left-to-right double-and-add
    ///
    /// Always performs `scalar_bits` iterations whatever the magnitude of `r`.
    /// The conditional add still branches on the scalar bits, so this is not a
    /// constant-time implementation.
    pub fn mult(&self, pt: &Point, r: &Integer) -> Result<Point, EcdsaError> {
        let width = self.params.scalar_bits;
        if *r < 0 || r.significant_bits() > width {
            return Err(EcdsaError::ScalarOutOfRange {
                bits: r.significant_bits(),
                max_bits: width,
            });
        }
        trace!("scalar multiplication over {} bits", width);

        let mut acc = Point::Identity;
        for i in (0..width).rev() {
            acc = self.ec_double(&acc)?;
            if r.get_bit(i) {
                acc = self.ec_add(&acc, pt)?;
            }
        }
        Ok(acc)
    }

    fn no_inverse(&self, operation: &str) -> EcdsaError {
        EcdsaError::NoInverse {
            operation: operation.to_string(),
            modulus_bits: self.params.p.significant_bits(),
        }
    }
}

fn affine_coordinates<'p>(
    pt: &'p Point,
    context: &str,
) -> Result<(&'p Integer, &'p Integer), EcdsaError> {
    match pt {
        Point::Affine { x, y } => Ok((x, y)),
        Point::Identity => Err(EcdsaError::InvalidPoint {
            context: format!("{}: identity has no affine coordinates", context),
        }),
    }
}
