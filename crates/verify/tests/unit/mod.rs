//! # Unit Components
//!
//! Tests grouped by the source module they exercise.

/// Bit timing, float codec and error rendering.
pub mod common;

/// Configuration parsing and defaults.
pub mod config;

/// End-to-end scenarios against the reference testbench.
pub mod scenario;



/// Bus statistics.
pub mod stats;
