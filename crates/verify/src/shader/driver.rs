//! Register and instruction-memory driver for the shader peripheral.
//!
//! The driver borrows a [`BusPort`] for its lifetime and translates logical
//! operations into bus transactions according to the selected
//! [`PeripheralProfile`]. It supports both operating modes:
//! 1. **Combinational:** write both operands, read ADD or MUL back immediately.
//! 2. **Programmable:** load registers and instructions, start, poll for halt,
//!    read the destination register.
//!
//! Which mode is exercised follows from the profile the caller picked.

use tracing::{debug, warn};

use crate::bus::BusPort;
use crate::common::constants::SHADER_REGISTERS;
use crate::common::{DeviceTimeout, FloatValue, Result, TimeoutBudget, VerifyError};
use crate::signal::SimTime;

use super::instruction::Instruction;
use super::profile::{PeripheralProfile, ProgrammableMap};
use super::state::{ControlFlags, PollBudget, ProcessorState, StatusFlags};

/// Destination register of the add program built by [`ShaderDriver::run_add_program`].
pub const ADD_PROGRAM_RD: usize = 2;

/// Driver for one shader peripheral behind a borrowed bus.
#[derive(Debug)]
pub struct ShaderDriver<'a, B: ?Sized> {
    bus: &'a mut B,
    profile: PeripheralProfile,
    state: ProcessorState,
}

impl<'a, B: BusPort + ?Sized> ShaderDriver<'a, B> {
    /// Drives the peripheral behind `bus` using `profile`'s address map.
    pub const fn new(bus: &'a mut B, profile: PeripheralProfile) -> Self {
        Self {
            bus,
            profile,
            state: ProcessorState::Idle,
        }
    }

    /// The selected profile.
    pub const fn profile(&self) -> &PeripheralProfile {
        &self.profile
    }

    /// Run state as observed through this driver.
    pub const fn state(&self) -> ProcessorState {
        self.state
    }

    /// The borrowed bus.
    pub fn bus(&mut self) -> &mut B {
        self.bus
    }

    const fn unsupported(&self, operation: &'static str) -> VerifyError {
        VerifyError::UnsupportedOperation {
            profile: self.profile.name(),
            operation,
        }
    }

    fn programmable(&self, operation: &'static str) -> Result<ProgrammableMap> {
        self.profile
            .programmable_map()
            .copied()
            .ok_or_else(|| self.unsupported(operation))
    }

    /// Writes `value` to register `index` (0..=3).
    pub fn write_register(&mut self, index: usize, value: f32) -> Result<()> {
        if index >= SHADER_REGISTERS {
            return Err(VerifyError::RegisterIndex(index));
        }
        let addr = self.profile.register_address(index)?;
        let value = FloatValue::from_f32(value);
        debug!("write {} @ {addr:#04x} = {value}", self.profile.register_name(index));
        self.bus.write_word(addr, value.bits())?;
        Ok(())
    }

    /// Reads register `index` (0..=3) as a float.
    pub fn read_register(&mut self, index: usize) -> Result<f32> {
        self.read_register_bits(index).map(|v| v.value())
    }

    /// Reads register `index` (0..=3) without interpreting NaN payloads.
    pub fn read_register_bits(&mut self, index: usize) -> Result<FloatValue> {
        if index >= SHADER_REGISTERS {
            return Err(VerifyError::RegisterIndex(index));
        }
        let addr = self.profile.register_address(index)?;
        let value = FloatValue::from_bits(self.bus.read_word(addr)?);
        debug!("read {} @ {addr:#04x} = {value}", self.profile.register_name(index));
        Ok(value)
    }

    /// Stores `instruction` in instruction-memory `slot`.
    pub fn write_instruction(&mut self, slot: usize, instruction: Instruction) -> Result<()> {
        let map = self.programmable("write_instruction")?;
        let addr = map.slot_address(slot)?;
        debug!("imem[{slot}] @ {addr:#04x} = {:#010x} ({instruction})", instruction.raw());
        self.bus.write_word(addr, instruction.raw())?;
        Ok(())
    }

    /// Stores `program` from slot 0 onwards.
    pub fn load_program(&mut self, program: &[Instruction]) -> Result<()> {
        let slots = self.programmable("load_program")?.usable_slots();
        if program.len() > slots {
            return Err(VerifyError::ProgramTooLong {
                len: program.len(),
                slots,
            });
        }
        for (slot, instruction) in program.iter().enumerate() {
            self.write_instruction(slot, *instruction)?;
        }
        Ok(())
    }

    fn write_control(&mut self, flags: ControlFlags) -> Result<()> {
        let map = self.programmable("control")?;
        debug!("control @ {:#04x} = {:#x} ({flags:?})", map.control, flags.encode());
        self.bus.write_word(map.control, flags.encode())?;
        Ok(())
    }

    /// Sets the start bit, and the PC-reset bit if `reset_program_counter`.
    ///
    /// Without a PC reset, execution resumes from the current program counter.
    pub fn start_execution(&mut self, reset_program_counter: bool) -> Result<()> {
        self.write_control(ControlFlags::start(reset_program_counter))?;
        self.state = ProcessorState::Running;
        Ok(())
    }

    /// Resets the program counter and leaves the unit stopped.
    pub fn reset_program_counter(&mut self) -> Result<()> {
        self.write_control(ControlFlags::reset_pc())?;
        self.state = ProcessorState::Idle;
        Ok(())
    }

    /// Clears the control register. A halted unit stays halted.
    pub fn stop_execution(&mut self) -> Result<()> {
        self.write_control(ControlFlags::stop())?;
        if self.state == ProcessorState::Running {
            self.state = ProcessorState::Idle;
        }
        Ok(())
    }

    /// Reads the status register.
    pub fn status(&mut self) -> Result<StatusFlags> {
        let map = self.programmable("status")?;
        let status = StatusFlags::from_raw(self.bus.read_word(map.status)?);
        if status.halted() {
            self.state = ProcessorState::Halted;
        }
        Ok(status)
    }

    /// `a + b` on the combinational revision.
    pub fn add(&mut self, a: f32, b: f32) -> Result<f32> {
        self.combinational_op(a, b, 2, "add")
    }

    /// `a * b` on the combinational revision.
    pub fn mul(&mut self, a: f32, b: f32) -> Result<f32> {
        self.combinational_op(a, b, 3, "mul")
    }

    fn combinational_op(&mut self, a: f32, b: f32, result: usize, operation: &'static str) -> Result<f32> {
        if !matches!(self.profile, PeripheralProfile::Combinational(_)) {
            return Err(self.unsupported(operation));
        }
        self.write_register(0, a)?;
        self.write_register(1, b)?;
        self.read_register(result)
    }

    /// Writes `value` to the minimal revision and reads back its increment.
    pub fn increment(&mut self, value: u32) -> Result<u32> {
        let PeripheralProfile::Minimal(map) = self.profile else {
            return Err(self.unsupported("increment"));
        };
        self.bus.write_word(map.data, value)?;
        let incremented = self.bus.read_word(map.incremented)?;
        debug!("increment {value:#x} -> {incremented:#x}");
        Ok(incremented)
    }
}

impl<B: BusPort + SimTime + ?Sized> ShaderDriver<'_, B> {
    /// Polls the status register until the halted bit is set.
    ///
    /// Polls are spaced by the budget's interval. Returns the number of polls
    /// taken, or [`VerifyError::DeviceTimeout`] once the budget is spent.
    pub fn wait_for_halt(&mut self, budget: PollBudget) -> Result<u32> {
        let status_addr = self.programmable("wait_for_halt")?.status;
        for poll in 1..=budget.max_polls {
            if self.status()?.halted() {
                debug!("halted after {poll} polls");
                return Ok(poll);
            }
            self.bus.wait(budget.interval());
        }
        warn!("no halt after {} polls of {status_addr:#04x}", budget.max_polls);
        Err(DeviceTimeout {
            waiting_for: format!("halt (status {status_addr:#04x} bit 1)"),
            budget: TimeoutBudget::Polls(budget.max_polls),
        }
        .into())
    }

    /// Computes `a + b` with a one-instruction program.
    ///
    /// Resets the PC, loads `r0 = a`, `r1 = b` and the program
    /// `fadd r2, r0, r1; halt`, runs it to the halt and reads `r2`.
    pub fn run_add_program(&mut self, a: f32, b: f32, budget: PollBudget) -> Result<f32> {
        self.reset_program_counter()?;
        self.write_register(0, a)?;
        self.write_register(1, b)?;
        self.load_program(&[Instruction::fadd(ADD_PROGRAM_RD, 0, 1)?, Instruction::HALT])?;
        self.start_execution(true)?;
        let _ = self.wait_for_halt(budget)?;
        self.stop_execution()?;
        self.read_register(ADD_PROGRAM_RD)
    }
}
