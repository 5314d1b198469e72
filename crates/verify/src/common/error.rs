//! Error taxonomy for the verification core.
//!
//! This module defines every failure a verification run can surface. It provides:
//! 1. **Protocol violations:** Serial framing and flow-control mismatches observed on a line.
//! 2. **Device timeouts:** Bounded waits on a bus acknowledge or a status poll that elapsed.
//! 3. **Tolerance failures:** Arithmetic results that disagree with the reference beyond epsilon.
//! 4. **Usage errors:** Register indices, instruction slots, or operations a profile cannot express.
//!
//! None of these are retried locally; they propagate to the caller immediately.

use std::fmt;

use thiserror::Error;

/// A serial framing or flow-control mismatch observed bit-by-bit on a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ProtocolViolation {
    /// The sample taken in the middle of the start bit was not logic 0.
    #[error("start bit not low")]
    StartBitNotLow,

    /// A data bit sample disagreed with the expected byte (LSB first).
    #[error("data bit {index} incorrect: expected {expected}")]
    DataBitMismatch {
        /// Data bit position, 0 being the least significant.
        index: usize,
        /// Level the byte encodes at this position.
        expected: u8,
    },

    /// The sample taken in the middle of the stop bit was not logic 1.
    #[error("stop bit not high")]
    StopBitNotHigh,

    /// The line was not idle (logic 1) after the stop bit.
    #[error("idle bit not high")]
    IdleBitNotHigh,

    /// The request-to-send line did not carry the expected level.
    ///
    /// Index 0 is the check before the start bit, 1 through 8 follow each data
    /// bit and 9 follows the stop bit.
    #[error("flow control mismatch at check {index}: expected rts={expected}")]
    FlowControlMismatch {
        /// Check position within the frame.
        index: usize,
        /// Level RTS was expected to carry.
        expected: u8,
    },
}

/// Failure to derive a bit period from a baud rate or clock divider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BitClockError {
    /// A baud rate of zero has no bit period.
    #[error("baud rate must be non-zero")]
    ZeroBaud,
    /// A source clock of zero hertz cannot time anything.
    #[error("source clock frequency must be non-zero")]
    ZeroClock,
    /// The divider (cycles per bit) resolved to zero.
    #[error("divider for {baud} baud from a {clock_hz} Hz clock is zero")]
    ZeroDivider {
        /// Requested baud rate.
        baud: u32,
        /// Source clock frequency.
        clock_hz: u64,
    },
}

/// A bit view asked for a bit its line does not carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("bit {index} out of range for a {width}-bit line")]
pub struct BitIndexError {
    /// Requested bit.
    pub index: u8,
    /// Bits the line carries.
    pub width: u8,
}

/// A bounded wait that elapsed before the device responded.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("device timeout waiting for {waiting_for} after {budget}")]
pub struct DeviceTimeout {
    /// What was being awaited (an acknowledge at an address, a halt, ...).
    pub waiting_for: String,
    /// The budget that ran out.
    pub budget: TimeoutBudget,
}

/// The kind of budget a [`DeviceTimeout`] exhausted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeoutBudget {
    /// Clock cycles spent waiting on a bus acknowledge.
    Cycles(u64),
    /// Status register polls.
    Polls(u32),
}

impl fmt::Display for TimeoutBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycles(n) => write!(f, "{n} cycles"),
            Self::Polls(n) => write!(f, "{n} polls"),
        }
    }
}

/// Arithmetic operation checked against the host reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
    /// Single-precision addition.
    Add,
    /// Single-precision multiplication.
    Mul,
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("+"),
            Self::Mul => f.write_str("*"),
        }
    }
}

/// Top-level error for every verification operation.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Serial framing or flow-control mismatch.
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),

    /// Computed result differs from the reference by more than epsilon.
    #[error("{a} {op} {b} = {actual} (expected {expected}, epsilon {epsilon})")]
    ToleranceExceeded {
        /// Operation under test.
        op: ArithOp,
        /// Left operand.
        a: f32,
        /// Right operand.
        b: f32,
        /// Value the device produced.
        actual: f32,
        /// Host reference value.
        expected: f32,
        /// Allowed absolute difference.
        epsilon: f32,
    },

    /// A register read back a different bit pattern than last written.
    #[error("register {register} corrupted: read {actual:#010x}, expected {expected:#010x}")]
    RegisterMismatch {
        /// Logical register name.
        register: &'static str,
        /// Bits read back.
        actual: u32,
        /// Bits last written.
        expected: u32,
    },

    /// A received byte differed from the byte that was sent.
    #[error("received byte {actual:#04x}, expected {expected:#04x}")]
    ByteMismatch {
        /// Byte read from the receive register.
        actual: u8,
        /// Byte driven onto the line.
        expected: u8,
    },

    /// An externally imposed deadline elapsed.
    #[error(transparent)]
    DeviceTimeout(#[from] DeviceTimeout),

    /// A signal view named a bit outside its line.
    #[error(transparent)]
    BitIndex(#[from] BitIndexError),

    /// Bit period could not be derived.
    #[error("bit clock: {0}")]
    Clock(#[from] BitClockError),

    /// Register index outside `0..=3`.
    #[error("register index {0} out of range (0..=3)")]
    RegisterIndex(usize),

    /// Instruction slot outside the profile's instruction memory.
    #[error("instruction slot {slot} out of range (profile has {slots} slots)")]
    InstructionSlot {
        /// Requested slot.
        slot: usize,
        /// Usable slots in the selected profile.
        slots: usize,
    },

    /// A program longer than the instruction memory.
    #[error("program of {len} instructions does not fit {slots} slots")]
    ProgramTooLong {
        /// Instructions supplied.
        len: usize,
        /// Usable slots in the selected profile.
        slots: usize,
    },

    /// The selected peripheral profile has no way to express the operation.
    #[error("{profile} profile does not support {operation}")]
    UnsupportedOperation {
        /// Profile name.
        profile: &'static str,
        /// Operation that was attempted.
        operation: &'static str,
    },

    /// Configuration or test-vector input could not be loaded.
    #[error("config: {0}")]
    Config(String),
}

impl From<serde_json::Error> for VerifyError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<std::io::Error> for VerifyError {
    fn from(e: std::io::Error) -> Self {
        Self::Config(e.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = VerifyError> = std::result::Result<T, E>;
