//! Shared arithmetic test vectors.
//!
//! The vector file is a JSON object `{"pairs": [[a, b], ...], "epsilon": e}`.
//! Operands are stored as doubles and narrowed to single precision before use,
//! so host and device compute on identical inputs.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::{Result, VerifyError};

/// Operand pairs and the tolerance every result must meet.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TestVectors {
    /// Operand pairs, in file order.
    pub pairs: Vec<(f64, f64)>,
    /// Maximum absolute difference from the host reference.
    pub epsilon: f64,
}

impl TestVectors {
    /// Vectors from explicit pairs.
    pub fn new(pairs: Vec<(f64, f64)>, epsilon: f64) -> Self {
        Self { pairs, epsilon }
    }

    /// Parses a vector document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let vectors: Self = serde_json::from_str(json)?;
        vectors.validate()?;
        Ok(vectors)
    }

    /// Reads and parses a vector file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.pairs.is_empty() {
            return Err(VerifyError::Config("test vectors contain no pairs".into()));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(VerifyError::Config(format!(
                "epsilon must be finite and positive, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }

    /// Pairs narrowed to single precision.
    pub fn pairs_f32(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.pairs.iter().map(|&(a, b)| (a as f32, b as f32))
    }

    /// Epsilon narrowed to single precision.
    pub fn epsilon_f32(&self) -> f32 {
        self.epsilon as f32
    }

    /// A small built-in set used when no vector file is given.
    pub fn builtin() -> Self {
        Self::new(
            vec![
                (1.0, 2.0),
                (-1.5, 0.25),
                (3.141_59, 2.718_28),
                (100.0, -0.001),
                (0.0, 0.0),
                (-7.5, -2.5),
                (12_345.678, 0.5),
                (1.0e-3, 1.0e3),
            ],
            1.0e-3,
        )
    }
}
