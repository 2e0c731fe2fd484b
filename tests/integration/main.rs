// tests/integration/main.rs
//! End-to-end signing and verification tests against the public API.

mod signatures;
