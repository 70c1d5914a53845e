//! Bit-level payload primitives.
pub mod bits;
