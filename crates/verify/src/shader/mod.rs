//! Memory-mapped driver for the shader processor peripheral.
//!
//! The shader unit is a four-register single-precision ALU with a tiny
//! instruction memory. This module provides:
//! 1. **Encoding:** Instruction words and their bit fields.
//! 2. **Profiles:** The address maps of the peripheral revisions.
//! 3. **State:** Run state plus status/control register encodings.
//! 4. **Driver:** Register, instruction-memory and execution control over a bus.

/// Register and execution driver.
pub mod driver;

/// Instruction encoding.
pub mod instruction;

/// Peripheral revisions and address maps.
pub mod profile;

/// Run state and register flag encodings.
pub mod state;

pub use driver::ShaderDriver;
pub use instruction::{Instruction, InstructionBits, Opcode, Operation};
pub use profile::{CombinationalMap, MinimalMap, PeripheralProfile, ProgrammableMap};
pub use state::{ControlFlags, PollBudget, ProcessorState, StatusFlags};
