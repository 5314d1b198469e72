//! Peripheral bus verification core.
//!
//! This crate drives memory-mapped peripherals over a narrow register bus and
//! checks them bit by bit:
//! 1. **Timing:** Bit periods from baud rates and clock dividers.
//! 2. **Links:** A bit-accurate UART transceiver model with RTS flow control.
//! 3. **Driver:** Register, instruction-memory and execution control for the
//!    shader processor peripheral.
//! 4. **Reference system:** Clocked peripheral models behind a testbench that
//!    implements the bus and simulated time.
//! 5. **Scenarios:** Arithmetic and UART checks, configuration and statistics.

/// Register bus transaction interface.
pub mod bus;
/// Common types: bit timing, float codec, constants and errors.
pub mod common;
/// Run configuration (bench timing, UART link, shader selection).
pub mod config;
/// End-to-end verification scenarios.
pub mod scenario;
/// Shader processor driver (instructions, profiles, execution control).
pub mod shader;
/// Simulated time and signal-line views.
pub mod signal;
/// Reference peripherals, pins and the clocked testbench.
pub mod soc;
/// Bus traffic statistics.
pub mod stats;
/// UART transceiver model.
pub mod uart;

/// Register bus port; implemented by the testbench and by test doubles.
pub use crate::bus::BusPort;
/// Crate error and result types.
pub use crate::common::{Result, VerifyError};
/// Root configuration type; use `Config::default()` or parse JSON.
pub use crate::config::Config;
/// Shader driver over a borrowed bus.
pub use crate::shader::ShaderDriver;
/// Clocked host for one peripheral model.
pub use crate::soc::Testbench;
/// UART link at a fixed bit period.
pub use crate::uart::UartLink;
