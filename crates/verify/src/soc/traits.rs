//! Peripheral trait for the reference device models.
//!
//! This module defines the `Peripheral` trait implemented by every model the
//! testbench can host. It provides:
//! 1. **Identification:** `name` for diagnostics.
//! 2. **Access:** Byte and word read/write at peripheral-relative offsets.
//! 3. **Lifecycle:** `reset` and a per-clock `tick` that samples the input
//!    pins and returns the output pins.
//!
//! All implementors must be `Send` so a testbench can move between threads.

/// A clocked memory-mapped peripheral with eight input and eight output pins.
pub trait Peripheral: Send {
    /// Returns a short name for this peripheral (e.g., `"UART"`).
    fn name(&self) -> &str;

    /// Reads four bytes (little-endian) at the given offset.
    fn read_u32(&mut self, offset: u32) -> u32;

    /// Writes four bytes (little-endian) at the given offset.
    fn write_u32(&mut self, offset: u32, val: u32);

    /// Reads one byte at the given offset (default: low byte of the word).
    fn read_u8(&mut self, offset: u32) -> u8 {
        self.read_u32(offset) as u8
    }

    /// Writes one byte at the given offset (default: zero-extended word write).
    fn write_u8(&mut self, offset: u32, val: u8) {
        self.write_u32(offset, u32::from(val));
    }

    /// Returns the peripheral to its power-on state.
    fn reset(&mut self);

    /// Advances one clock cycle with `ui_in` on the input pins; returns `uo_out`.
    fn tick(&mut self, ui_in: u8) -> u8;
}
