//! End-to-end verification scenarios.
//!
//! Scenarios compose the link models and the shader driver into the checks a
//! run performs against a device:
//! 1. **Arithmetic:** Operand pairs through the shader unit, compared to the
//!    host's single-precision result within epsilon.
//! 2. **UART:** Transmit framing, receive with flow control, pin routing and
//!    divider changes.
//!
//! Every scenario stops at the first failing check and returns its error.

/// Shader arithmetic and counter scenarios.
pub mod arithmetic;

/// UART scenarios.
pub mod uart;

/// Operand-pair vector files.
pub mod vectors;

use std::fmt;

use tracing::info;

pub use arithmetic::{check_tolerance, run_arithmetic, run_combinational, run_counter, run_programmable};
pub use uart::{PinRoute, run_basic, run_divider_sweep};
pub use vectors::TestVectors;

/// Cases a scenario passed, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScenarioReport {
    /// Scenario name.
    pub name: String,
    /// Descriptions of the passed cases.
    pub passed: Vec<String>,
}

impl ScenarioReport {
    /// An empty report for scenario `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: Vec::new(),
        }
    }

    /// Records a passed case.
    pub fn pass(&mut self, case: impl Into<String>) {
        let case = case.into();
        info!("{}: passed {case}", self.name);
        self.passed.push(case);
    }

    /// Number of passed cases.
    pub fn len(&self) -> usize {
        self.passed.len()
    }

    /// Returns `true` if no case has passed yet.
    pub fn is_empty(&self) -> bool {
        self.passed.is_empty()
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {} cases passed", self.name, self.passed.len())?;
        for case in &self.passed {
            writeln!(f, "  ok  {case}")?;
        }
        Ok(())
    }
}
