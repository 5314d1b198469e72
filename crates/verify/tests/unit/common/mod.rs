//! Common building-block tests.



/// Float encode/decode and tolerance comparison.
pub mod float;
