// src/curves/mod.rs
//! Curve points and the elliptic-curve group law.

pub mod elliptic_curve;
pub mod point;

pub use elliptic_curve::Curve;
pub use point::Point;
