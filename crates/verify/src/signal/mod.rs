//! Signal-line and simulated-time abstractions.
//!
//! The link models never own the signals they drive. They borrow:
//! 1. **Time:** A [`SimTime`] that suspends the caller until simulated time advances.
//! 2. **Raw handles:** A [`LineHandle`] for a single wire or a packed multi-bit bus.
//! 3. **Bit views:** A [`SignalBit`] over a handle, either the whole wire
//!    ([`SingleLine`]) or one bit of a bus ([`IndexedBusBit`]).
//!
//! Handles use interior mutability, like HDL simulator handles: reading and
//! driving only need a shared reference, and several views may alias the same
//! bus. Concurrent use of one handle from two flows of control is undefined.

/// Single-line and indexed-bus-bit views.
pub mod line;

use std::time::Duration;

pub use line::{IndexedBusBit, SingleLine};

/// Simulated time that a caller suspends on.
///
/// `wait` returns once the simulation has advanced by `duration`, letting the
/// device under test react to driven signals in the meantime.
pub trait SimTime {
    /// Advances simulated time by `duration`.
    fn wait(&mut self, duration: Duration);
    /// Current simulated time.
    fn now(&self) -> Duration;
}

impl<T: SimTime + ?Sized> SimTime for &mut T {
    fn wait(&mut self, duration: Duration) {
        (**self).wait(duration);
    }

    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// A raw simulator signal handle: one wire, or a packed bus of up to 64 bits.
pub trait LineHandle {
    /// Current packed value.
    fn value(&self) -> u64;
    /// Drives a new packed value.
    fn drive(&self, value: u64);
    /// Bits the handle carries.
    fn width(&self) -> u8 {
        64
    }
}

impl<H: LineHandle + ?Sized> LineHandle for &H {
    fn value(&self) -> u64 {
        (**self).value()
    }

    fn drive(&self, value: u64) {
        (**self).drive(value);
    }

    fn width(&self) -> u8 {
        (**self).width()
    }
}

/// The single capability the link models need: one readable/writable bit.
pub trait SignalBit {
    /// Samples the bit (`true` is logic 1).
    fn get(&self) -> bool;
    /// Drives the bit.
    fn set(&self, level: bool);
}

impl<S: SignalBit + ?Sized> SignalBit for &S {
    fn get(&self) -> bool {
        (**self).get()
    }

    fn set(&self, level: bool) {
        (**self).set(level);
    }
}
