//! Peripheral profiles: the register address maps of the shader peripheral.
//!
//! Three incompatible revisions of the peripheral exist and share register
//! offsets with different meanings. A run picks exactly one profile up front;
//! nothing is inferred from register contents.

use serde::Deserialize;

use crate::common::constants::{SHADER_MAX_SLOTS, SHADER_REGISTERS, WORD_BYTES, shader_regs};
use crate::common::{Result, VerifyError};

/// Register map of the combinational revision.
///
/// `add` and `mul` are pure functions of the last-written operands and are
/// valid as soon as the second operand write completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CombinationalMap {
    /// Operand A.
    pub a: u32,
    /// Operand B.
    pub b: u32,
    /// `A + B`, read-only.
    pub add: u32,
    /// `A * B`, read-only.
    pub mul: u32,
}

impl Default for CombinationalMap {
    fn default() -> Self {
        Self {
            a: shader_regs::COMB_A,
            b: shader_regs::COMB_B,
            add: shader_regs::COMB_ADD,
            mul: shader_regs::COMB_MUL,
        }
    }
}

/// Register map of the programmable revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProgrammableMap {
    /// Offset of register 0; registers follow at word stride.
    pub registers: u32,
    /// Status register (bit 0 running, bit 1 halted).
    pub status: u32,
    /// Instruction memory base; slots follow at word stride.
    pub instruction_memory: u32,
    /// Instruction slots implemented by the hardware.
    pub instruction_slots: usize,
    /// Control register (bit 0 start, bit 1 reset PC).
    pub control: u32,
}

impl ProgrammableMap {
    /// Slots that can actually be written.
    ///
    /// A slot whose address coincides with the control register is shadowed by
    /// it, as is every slot after it.
    pub fn usable_slots(&self) -> usize {
        let implemented = self.instruction_slots.min(SHADER_MAX_SLOTS);
        let end = self.instruction_memory + implemented as u32 * WORD_BYTES;
        if (self.instruction_memory..end).contains(&self.control) {
            ((self.control - self.instruction_memory) / WORD_BYTES) as usize
        } else {
            implemented
        }
    }

    /// Address of instruction `slot`.
    pub fn slot_address(&self, slot: usize) -> Result<u32> {
        let slots = self.usable_slots();
        if slot >= slots {
            return Err(VerifyError::InstructionSlot { slot, slots });
        }
        Ok(self.instruction_memory + slot as u32 * WORD_BYTES)
    }
}

impl Default for ProgrammableMap {
    fn default() -> Self {
        Self {
            registers: shader_regs::PROG_REGS,
            status: shader_regs::PROG_STATUS,
            instruction_memory: shader_regs::PROG_IMEM,
            instruction_slots: SHADER_MAX_SLOTS,
            control: shader_regs::PROG_CONTROL,
        }
    }
}

/// Register map of the minimal increment-only revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MinimalMap {
    /// Data register.
    pub data: u32,
    /// Data plus one, read-only.
    pub incremented: u32,
}

impl Default for MinimalMap {
    fn default() -> Self {
        Self {
            data: shader_regs::MIN_DATA,
            incremented: shader_regs::MIN_INCREMENTED,
        }
    }
}

/// One revision of the peripheral and its address map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PeripheralProfile {
    /// Pure combinational add/multiply.
    Combinational(CombinationalMap),
    /// Load-instructions / execute / halt.
    Programmable(ProgrammableMap),
    /// Increment-only counter.
    Minimal(MinimalMap),
}

impl Default for PeripheralProfile {
    fn default() -> Self {
        Self::Programmable(ProgrammableMap::default())
    }
}

impl PeripheralProfile {
    /// Combinational profile with the default map.
    pub fn combinational() -> Self {
        Self::Combinational(CombinationalMap::default())
    }

    /// Programmable profile with the default map.
    pub fn programmable() -> Self {
        Self::Programmable(ProgrammableMap::default())
    }

    /// Minimal profile with the default map.
    pub fn minimal() -> Self {
        Self::Minimal(MinimalMap::default())
    }

    /// Short profile name for diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Combinational(_) => "combinational",
            Self::Programmable(_) => "programmable",
            Self::Minimal(_) => "minimal",
        }
    }

    /// Address of logical register `index`.
    ///
    /// Combinational registers are A, B, ADD, MUL in that order; programmable
    /// registers are r0 to r3; the minimal profile has DATA and INCREMENTED.
    pub fn register_address(&self, index: usize) -> Result<u32> {
        match self {
            Self::Combinational(map) => [map.a, map.b, map.add, map.mul]
                .get(index)
                .copied()
                .ok_or(VerifyError::RegisterIndex(index)),
            Self::Programmable(map) if index < SHADER_REGISTERS => {
                Ok(map.registers + index as u32 * WORD_BYTES)
            }
            Self::Minimal(map) => [map.data, map.incremented]
                .get(index)
                .copied()
                .ok_or(VerifyError::RegisterIndex(index)),
            Self::Programmable(_) => Err(VerifyError::RegisterIndex(index)),
        }
    }

    /// Logical name of register `index`, for diagnostics.
    pub const fn register_name(&self, index: usize) -> &'static str {
        match (self, index) {
            (Self::Combinational(_), 0) => "A",
            (Self::Combinational(_), 1) => "B",
            (Self::Combinational(_), 2) => "ADD",
            (Self::Combinational(_), 3) => "MUL",
            (Self::Programmable(_), 0) => "r0",
            (Self::Programmable(_), 1) => "r1",
            (Self::Programmable(_), 2) => "r2",
            (Self::Programmable(_), 3) => "r3",
            (Self::Minimal(_), 0) => "DATA",
            (Self::Minimal(_), 1) => "INCREMENTED",
            _ => "?",
        }
    }

    /// The programmable map, if this is the programmable profile.
    pub const fn programmable_map(&self) -> Option<&ProgrammableMap> {
        match self {
            Self::Programmable(map) => Some(map),
            _ => None,
        }
    }
}
