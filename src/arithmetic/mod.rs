// src/arithmetic/mod.rs
//! Modular big-integer arithmetic over `rug::Integer`.

pub mod encoding;
pub mod modular;

pub use encoding::{from_be_bytes, to_fixed_bytes};
pub use modular::{add_mod, div_mod, mul_mod, neg_mod, normalize, sub_mod};
