//! Bus transaction interface to the device under test.
//!
//! The verification core consumes, but does not implement, the narrow
//! register bus of the simulated device. Every transaction suspends the
//! caller until the device acknowledges it; a transaction the device never
//! acknowledges surfaces as a [`DeviceTimeout`] once the port's own bound
//! elapses.
//!
//! Transactions on one port are totally ordered by issuance. Implementations
//! must not reorder or batch them: an operand write has to be visible before
//! the next read samples a dependent register.

use crate::common::DeviceTimeout;

/// Word/byte register access to one peripheral.
pub trait BusPort {
    /// Reads the 32-bit register at byte offset `addr`.
    fn read_word(&mut self, addr: u32) -> Result<u32, DeviceTimeout>;

    /// Writes the 32-bit register at byte offset `addr`.
    fn write_word(&mut self, addr: u32, value: u32) -> Result<(), DeviceTimeout>;

    /// Reads the byte register at `addr`.
    fn read_byte(&mut self, addr: u32) -> Result<u8, DeviceTimeout>;

    /// Writes the byte register at `addr`.
    ///
    /// With `synchronous` false the write is issued but the caller resumes
    /// without waiting for the acknowledge. This is a property of the bus
    /// port only; it does not alter what the peripheral does with the byte.
    fn write_byte(&mut self, addr: u32, value: u8, synchronous: bool) -> Result<(), DeviceTimeout>;

    /// Resets the device with its input pins held at `initial_input_state`.
    fn reset(&mut self, initial_input_state: u8) -> Result<(), DeviceTimeout>;
}

impl<B: BusPort + ?Sized> BusPort for &mut B {
    fn read_word(&mut self, addr: u32) -> Result<u32, DeviceTimeout> {
        (**self).read_word(addr)
    }

    fn write_word(&mut self, addr: u32, value: u32) -> Result<(), DeviceTimeout> {
        (**self).write_word(addr, value)
    }

    fn read_byte(&mut self, addr: u32) -> Result<u8, DeviceTimeout> {
        (**self).read_byte(addr)
    }

    fn write_byte(&mut self, addr: u32, value: u8, synchronous: bool) -> Result<(), DeviceTimeout> {
        (**self).write_byte(addr, value, synchronous)
    }

    fn reset(&mut self, initial_input_state: u8) -> Result<(), DeviceTimeout> {
        (**self).reset(initial_input_state)
    }
}
