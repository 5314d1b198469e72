//! Reference model of the shader processor peripheral.
//!
//! Implements the combinational and programmable revisions over the address
//! maps in [`crate::shader::profile`]. The programmable unit executes one
//! instruction every `cycles_per_instruction` clocks while running and stops
//! at an all-zero word or at the end of its instruction memory.

use tracing::{debug, trace, warn};

use crate::common::constants::{
    CONTROL_RESET_PC, CONTROL_START, SHADER_MAX_SLOTS, SHADER_REGISTERS, STATUS_HALTED,
    STATUS_RUNNING, WORD_BYTES,
};
use crate::shader::instruction::{Instruction, Operation};
use crate::shader::profile::{CombinationalMap, ProgrammableMap};
use crate::soc::traits::Peripheral;

/// Execution core of the programmable revision.
#[derive(Clone, Debug)]
struct Core {
    map: ProgrammableMap,
    cycles_per_instruction: u32,
    registers: [u32; SHADER_REGISTERS],
    imem: [u32; SHADER_MAX_SLOTS],
    control: u32,
    pc: usize,
    running: bool,
    halted: bool,
    countdown: u32,
}

impl Core {
    fn new(map: ProgrammableMap, cycles_per_instruction: u32) -> Self {
        let cycles_per_instruction = cycles_per_instruction.max(1);
        Self {
            map,
            cycles_per_instruction,
            registers: [0; SHADER_REGISTERS],
            imem: [0; SHADER_MAX_SLOTS],
            control: 0,
            pc: 0,
            running: false,
            halted: false,
            countdown: cycles_per_instruction,
        }
    }

    fn register_index(&self, offset: u32) -> Option<usize> {
        let index = offset.checked_sub(self.map.registers)? / WORD_BYTES;
        let aligned = offset.checked_sub(self.map.registers)? % WORD_BYTES == 0;
        (aligned && (index as usize) < SHADER_REGISTERS).then_some(index as usize)
    }

    fn slot_index(&self, offset: u32) -> Option<usize> {
        let rel = offset.checked_sub(self.map.instruction_memory)?;
        let slot = (rel / WORD_BYTES) as usize;
        (rel % WORD_BYTES == 0 && slot < self.map.usable_slots()).then_some(slot)
    }

    fn status(&self) -> u32 {
        let mut status = 0;
        if self.running {
            status |= STATUS_RUNNING;
        }
        if self.halted {
            status |= STATUS_HALTED;
        }
        status
    }

    fn read(&self, offset: u32) -> u32 {
        if offset == self.map.control {
            return self.control;
        }
        if offset == self.map.status {
            return self.status();
        }
        if let Some(index) = self.register_index(offset) {
            return self.registers[index];
        }
        self.slot_index(offset).map_or(0, |slot| self.imem[slot])
    }

    fn write(&mut self, offset: u32, val: u32) {
        if offset == self.map.control {
            self.write_control(val);
        } else if let Some(index) = self.register_index(offset) {
            self.registers[index] = val;
        } else if let Some(slot) = self.slot_index(offset) {
            self.imem[slot] = val;
        } else if offset != self.map.status {
            warn!("shader: write to unmapped offset {offset:#04x}");
        }
    }

    fn write_control(&mut self, val: u32) {
        self.control = val;
        if val & CONTROL_RESET_PC != 0 {
            self.pc = 0;
            self.halted = false;
            self.running = false;
        }
        if val & CONTROL_START != 0 {
            if !self.running {
                self.countdown = self.cycles_per_instruction;
            }
            self.running = true;
            self.halted = false;
        } else {
            self.running = false;
        }
        debug!(
            "shader: control {val:#x}, pc {}, running {}",
            self.pc, self.running
        );
    }

    fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.countdown -= 1;
        if self.countdown > 0 {
            return;
        }
        self.countdown = self.cycles_per_instruction;
        self.step();
    }

    fn step(&mut self) {
        let Some(&raw) = self.imem[..self.map.usable_slots()].get(self.pc) else {
            debug!("shader: ran off instruction memory at pc {}", self.pc);
            self.halt();
            return;
        };
        let inst = Instruction::from_raw(raw);
        match inst.decode() {
            Operation::Halt => self.halt(),
            Operation::Arith { op, rd, rs1, rs2 } => {
                let a = f32::from_bits(self.reg(rs1));
                let b = f32::from_bits(self.reg(rs2));
                let result = op.apply(a, b);
                trace!("shader: pc {} {inst} -> {result}", self.pc);
                if let Some(slot) = self.registers.get_mut(rd) {
                    *slot = result.to_bits();
                }
                self.pc += 1;
            }
            Operation::Unknown(funct7) => {
                warn!("shader: unknown funct7 {funct7:#04x} at pc {}", self.pc);
                self.pc += 1;
            }
        }
    }

    fn reg(&self, index: usize) -> u32 {
        self.registers.get(index).copied().unwrap_or(0)
    }

    fn halt(&mut self) {
        debug!("shader: halted at pc {}", self.pc);
        self.running = false;
        self.halted = true;
    }
}

#[derive(Clone, Debug)]
enum Revision {
    Combinational { map: CombinationalMap, a: u32, b: u32 },
    Programmable(Core),
}

/// Shader processor peripheral model.
#[derive(Clone, Debug)]
pub struct ShaderUnit {
    revision: Revision,
}

impl ShaderUnit {
    /// A combinational unit: results are valid as soon as operands are written.
    pub const fn combinational(map: CombinationalMap) -> Self {
        Self {
            revision: Revision::Combinational { map, a: 0, b: 0 },
        }
    }

    /// A programmable unit executing one instruction per `cycles_per_instruction` clocks.
    pub fn programmable(map: ProgrammableMap, cycles_per_instruction: u32) -> Self {
        Self {
            revision: Revision::Programmable(Core::new(map, cycles_per_instruction)),
        }
    }

    /// Program counter of a programmable unit.
    pub const fn program_counter(&self) -> Option<usize> {
        match &self.revision {
            Revision::Programmable(core) => Some(core.pc),
            Revision::Combinational { .. } => None,
        }
    }
}

impl Peripheral for ShaderUnit {
    fn name(&self) -> &str {
        match self.revision {
            Revision::Combinational { .. } => "shader (combinational)",
            Revision::Programmable(_) => "shader (programmable)",
        }
    }

    fn read_u32(&mut self, offset: u32) -> u32 {
        match &self.revision {
            Revision::Combinational { map, a, b } => {
                let (fa, fb) = (f32::from_bits(*a), f32::from_bits(*b));
                match offset {
                    o if o == map.a => *a,
                    o if o == map.b => *b,
                    o if o == map.add => (fa + fb).to_bits(),
                    o if o == map.mul => (fa * fb).to_bits(),
                    _ => 0,
                }
            }
            Revision::Programmable(core) => core.read(offset),
        }
    }

    fn write_u32(&mut self, offset: u32, val: u32) {
        match &mut self.revision {
            Revision::Combinational { map, a, b } => {
                if offset == map.a {
                    *a = val;
                } else if offset == map.b {
                    *b = val;
                }
            }
            Revision::Programmable(core) => core.write(offset, val),
        }
    }

    fn reset(&mut self) {
        match &mut self.revision {
            Revision::Combinational { a, b, .. } => {
                *a = 0;
                *b = 0;
            }
            Revision::Programmable(core) => *core = Core::new(core.map, core.cycles_per_instruction),
        }
    }

    fn tick(&mut self, _ui_in: u8) -> u8 {
        match &mut self.revision {
            Revision::Programmable(core) => {
                core.tick();
                core.status() as u8
            }
            Revision::Combinational { .. } => 0,
        }
    }
}
