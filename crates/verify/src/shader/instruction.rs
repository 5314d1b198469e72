//! Shader instruction encoding and decoding.
//!
//! Instructions are 32-bit words laid out like RISC-V R-type operations:
//! `[funct7:7][rs2:5][rs1:5][unused:3][rd:5][unused:7]`. `funct7` selects the
//! operation; an all-zero word halts execution. The low seven bits are ignored
//! by the unit; encoded operations carry the OP-FP major opcode there so the
//! same words are valid single-precision RISC-V instructions.

use std::fmt;

use crate::common::constants::SHADER_REGISTERS;
use crate::common::{Result, VerifyError};

/// Bit mask for the destination register field (bits 7-11).
pub const RD_MASK: u32 = 0x1F;
/// Bit mask for the first source register field (bits 15-19).
pub const RS1_MASK: u32 = 0x1F;
/// Bit mask for the second source register field (bits 20-24).
pub const RS2_MASK: u32 = 0x1F;
/// Bit mask for the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;
/// Bit mask for the ignored major-opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// RISC-V OP-FP major opcode, placed in the ignored low bits.
pub const OP_FP: u32 = 0x53;

/// Field extraction over raw instruction words.
pub trait InstructionBits {
    /// Operation selector (bits 25-31).
    fn funct7(&self) -> u32;
    /// Second source register (bits 20-24).
    fn rs2(&self) -> usize;
    /// First source register (bits 15-19).
    fn rs1(&self) -> usize;
    /// Destination register (bits 7-11).
    fn rd(&self) -> usize;
    /// Ignored major-opcode field (bits 0-6).
    fn opcode(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & RS2_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & RS1_MASK) as usize
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & RD_MASK) as usize
    }

    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }
}

/// Operations selected by `funct7`.
///
/// New operations extend this enum with their `funct7` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `rd = rs1 + rs2` in single precision.
    FAdd,
}

impl Opcode {
    /// The `funct7` encoding.
    pub const fn funct7(self) -> u32 {
        match self {
            Self::FAdd => 0x00,
        }
    }

    /// Looks up the operation for a `funct7` value.
    pub const fn from_funct7(funct7: u32) -> Option<Self> {
        match funct7 {
            0x00 => Some(Self::FAdd),
            _ => None,
        }
    }

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::FAdd => "fadd",
        }
    }

    /// Applies the operation to two operands.
    pub fn apply(self, a: f32, b: f32) -> f32 {
        match self {
            Self::FAdd => a + b,
        }
    }
}

/// A decoded instruction word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// All-zero word: stop execution.
    Halt,
    /// A defined register-register operation.
    Arith {
        /// Operation.
        op: Opcode,
        /// Destination register.
        rd: usize,
        /// First source register.
        rs1: usize,
        /// Second source register.
        rs2: usize,
    },
    /// A `funct7` with no defined operation.
    Unknown(u32),
}

/// A raw 32-bit shader instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Instruction(u32);

impl Instruction {
    /// The halt instruction.
    pub const HALT: Self = Self(0);

    /// Wraps a raw word without validation.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Encodes `op` with register operands.
    ///
    /// Register indices must address one of the unit's four registers.
    pub fn encode(op: Opcode, rd: usize, rs1: usize, rs2: usize) -> Result<Self> {
        for reg in [rd, rs1, rs2] {
            if reg >= SHADER_REGISTERS {
                return Err(VerifyError::RegisterIndex(reg));
            }
        }
        Ok(Self(
            op.funct7() << 25
                | (rs2 as u32 & RS2_MASK) << 20
                | (rs1 as u32 & RS1_MASK) << 15
                | (rd as u32 & RD_MASK) << 7
                | OP_FP,
        ))
    }

    /// `fadd rd, rs1, rs2`.
    pub fn fadd(rd: usize, rs1: usize, rs2: usize) -> Result<Self> {
        Self::encode(Opcode::FAdd, rd, rs1, rs2)
    }

    /// The raw word.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns `true` for the all-zero halt word.
    #[inline]
    pub const fn is_halt(self) -> bool {
        self.0 == 0
    }

    /// Decodes the word.
    pub fn decode(self) -> Operation {
        if self.is_halt() {
            return Operation::Halt;
        }
        let raw = self.0;
        Opcode::from_funct7(raw.funct7()).map_or(Operation::Unknown(raw.funct7()), |op| {
            Operation::Arith {
                op,
                rd: raw.rd(),
                rs1: raw.rs1(),
                rs2: raw.rs2(),
            }
        })
    }
}

impl From<Instruction> for u32 {
    fn from(inst: Instruction) -> Self {
        inst.0
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decode() {
            Operation::Halt => f.write_str("halt"),
            Operation::Arith { op, rd, rs1, rs2 } => {
                write!(f, "{} r{rd}, r{rs1}, r{rs2}", op.mnemonic())
            }
            Operation::Unknown(funct7) => write!(f, "unknown funct7={funct7:#04x} ({:#010x})", self.0),
        }
    }
}
