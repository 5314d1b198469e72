//! Processor run state and the status/control register encodings.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::common::constants::{CONTROL_RESET_PC, CONTROL_START, STATUS_HALTED, STATUS_RUNNING};

/// Default status polls before `wait_for_halt` gives up.
const DEFAULT_MAX_POLLS: u32 = 100_000;

/// Default simulated time between status polls, in nanoseconds.
const DEFAULT_POLL_INTERVAL_NS: u64 = 1_000;

/// Where a single program run stands, as far as the driver has observed.
///
/// ```text
/// Idle --start(reset_pc)--> Running --halt reached--> Halted
///   ^                          |                         |
///   +------- reset PC ---------+-------------------------+
/// ```
///
/// Starting again without a PC reset resumes from the current program counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProcessorState {
    /// After reset, a PC reset, or a manual stop.
    #[default]
    Idle,
    /// A start was issued and no halt has been observed yet.
    Running,
    /// The status register reported a halt.
    Halted,
}

impl fmt::Display for ProcessorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Halted => "halted",
        })
    }
}

/// Decoded status register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusFlags(u32);

impl StatusFlags {
    /// Wraps a raw status word.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw word.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Bit 0: a program is executing.
    pub const fn running(self) -> bool {
        self.0 & STATUS_RUNNING != 0
    }

    /// Bit 1: execution reached a halt instruction.
    pub const fn halted(self) -> bool {
        self.0 & STATUS_HALTED != 0
    }
}

/// Control register write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlFlags {
    /// Bit 0: start (or resume) execution.
    pub start: bool,
    /// Bit 1: reset the program counter first.
    pub reset_pc: bool,
}

impl ControlFlags {
    /// Start, optionally resetting the program counter.
    pub const fn start(reset_pc: bool) -> Self {
        Self {
            start: true,
            reset_pc,
        }
    }

    /// Reset the program counter without starting.
    pub const fn reset_pc() -> Self {
        Self {
            start: false,
            reset_pc: true,
        }
    }

    /// Clear both bits, stopping execution.
    pub const fn stop() -> Self {
        Self {
            start: false,
            reset_pc: false,
        }
    }

    /// Register encoding.
    pub const fn encode(self) -> u32 {
        (if self.start { CONTROL_START } else { 0 }) | (if self.reset_pc { CONTROL_RESET_PC } else { 0 })
    }

    /// Decodes a register write.
    pub const fn decode(raw: u32) -> Self {
        Self {
            start: raw & CONTROL_START != 0,
            reset_pc: raw & CONTROL_RESET_PC != 0,
        }
    }
}

/// Bound on a status poll loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PollBudget {
    /// Polls before giving up.
    pub max_polls: u32,
    /// Simulated time between polls, in nanoseconds.
    pub interval_ns: u64,
}

impl PollBudget {
    /// A budget of `max_polls` polls spaced `interval` apart.
    pub fn new(max_polls: u32, interval: Duration) -> Self {
        Self {
            max_polls,
            interval_ns: interval.as_nanos() as u64,
        }
    }

    /// Time between polls.
    pub const fn interval(&self) -> Duration {
        Duration::from_nanos(self.interval_ns)
    }
}

impl Default for PollBudget {
    fn default() -> Self {
        Self {
            max_polls: DEFAULT_MAX_POLLS,
            interval_ns: DEFAULT_POLL_INTERVAL_NS,
        }
    }
}
