//! Configuration for verification runs.
//!
//! This module defines the configuration consumed by the testbench and the
//! scenarios. It provides:
//! 1. **Defaults:** Clock, bus and UART constants of the reference design.
//! 2. **Structures:** Bench, UART and shader sections.
//!
//! Configuration is read from JSON; every field is optional and falls back to
//! the `defaults` module, so `{}` is a complete configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::Result;
use crate::common::constants::UART_RESET_BAUD;
use crate::shader::{PeripheralProfile, PollBudget};

/// Default configuration constants.
mod defaults {
    /// Peripheral clock (64 MHz).
    pub const CLOCK_HZ: u64 = 64_000_000;

    /// Clock cycles between a bus request and its acknowledge.
    pub const BUS_LATENCY_CYCLES: u64 = 4;

    /// Cycles to wait for an acknowledge before giving up.
    pub const BUS_TIMEOUT_CYCLES: u64 = 64;

    /// Cycles reset is held for.
    pub const RESET_CYCLES: u64 = 10;

    /// Input pins during and after reset: only the RX line (bit 7) high.
    pub const INITIAL_INPUT_STATE: u8 = 0x80;

    /// Clocks per shader instruction.
    pub const CYCLES_PER_INSTRUCTION: u32 = 4;
}

/// Top-level configuration.
///
/// # Example
///
/// ```
/// use busbench_core::config::Config;
/// use busbench_core::shader::PeripheralProfile;
///
/// let json = r#"{
///     "uart": { "baud": 9600 },
///     "shader": { "profile": { "kind": "combinational" } }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.uart.baud, 9600);
/// assert_eq!(config.bench.clock_hz, 64_000_000);
/// assert_eq!(config.shader.profile, PeripheralProfile::combinational());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Clock and bus timing of the testbench.
    pub bench: BenchConfig,
    /// UART link parameters.
    pub uart: UartConfig,
    /// Shader peripheral selection and polling.
    pub shader: ShaderConfig,
}

impl Config {
    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Clock and bus timing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BenchConfig {
    /// Peripheral clock frequency in Hz
    #[serde(default = "BenchConfig::default_clock_hz")]
    pub clock_hz: u64,

    /// Cycles from bus request to acknowledge
    #[serde(default = "BenchConfig::default_bus_latency_cycles")]
    pub bus_latency_cycles: u64,

    /// Cycles without acknowledge before a transaction times out
    #[serde(default = "BenchConfig::default_bus_timeout_cycles")]
    pub bus_timeout_cycles: u64,

    /// Cycles reset is asserted for
    #[serde(default = "BenchConfig::default_reset_cycles")]
    pub reset_cycles: u64,
}

impl BenchConfig {
    fn default_clock_hz() -> u64 {
        defaults::CLOCK_HZ
    }

    fn default_bus_latency_cycles() -> u64 {
        defaults::BUS_LATENCY_CYCLES
    }

    fn default_bus_timeout_cycles() -> u64 {
        defaults::BUS_TIMEOUT_CYCLES
    }

    fn default_reset_cycles() -> u64 {
        defaults::RESET_CYCLES
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            clock_hz: defaults::CLOCK_HZ,
            bus_latency_cycles: defaults::BUS_LATENCY_CYCLES,
            bus_timeout_cycles: defaults::BUS_TIMEOUT_CYCLES,
            reset_cycles: defaults::RESET_CYCLES,
        }
    }
}

/// UART link parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UartConfig {
    /// Baud rate used for framing and written to the divider
    #[serde(default = "UartConfig::default_baud")]
    pub baud: u32,

    /// Input pin levels driven during reset
    #[serde(default = "UartConfig::default_initial_input_state")]
    pub initial_input_state: u8,
}

impl UartConfig {
    fn default_baud() -> u32 {
        UART_RESET_BAUD
    }

    fn default_initial_input_state() -> u8 {
        defaults::INITIAL_INPUT_STATE
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baud: UART_RESET_BAUD,
            initial_input_state: defaults::INITIAL_INPUT_STATE,
        }
    }
}

/// Shader peripheral selection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShaderConfig {
    /// Peripheral revision and address map
    #[serde(default)]
    pub profile: PeripheralProfile,

    /// Halt polling budget
    #[serde(default)]
    pub poll: PollBudget,

    /// Clocks per instruction of the reference programmable unit
    #[serde(default = "ShaderConfig::default_cycles_per_instruction")]
    pub cycles_per_instruction: u32,
}

impl ShaderConfig {
    fn default_cycles_per_instruction() -> u32 {
        defaults::CYCLES_PER_INSTRUCTION
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            profile: PeripheralProfile::default(),
            poll: PollBudget::default(),
            cycles_per_instruction: defaults::CYCLES_PER_INSTRUCTION,
        }
    }
}
