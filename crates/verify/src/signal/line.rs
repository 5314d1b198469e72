//! Concrete [`SignalBit`] views over raw handles.

use super::{LineHandle, SignalBit};
use crate::common::BitIndexError;

/// A handle that is itself a single wire.
#[derive(Clone, Debug)]
pub struct SingleLine<H> {
    handle: H,
}

impl<H: LineHandle> SingleLine<H> {
    /// Views `handle` as one bit.
    pub const fn new(handle: H) -> Self {
        Self { handle }
    }

    /// The underlying handle.
    pub const fn handle(&self) -> &H {
        &self.handle
    }
}

impl<H: LineHandle> SignalBit for SingleLine<H> {
    #[inline]
    fn get(&self) -> bool {
        self.handle.value() & 1 != 0
    }

    #[inline]
    fn set(&self, level: bool) {
        self.handle.drive(u64::from(level));
    }
}

/// One bit of a packed multi-bit bus.
///
/// Driving the bit is a read-modify-write of the whole bus value; the other
/// bits keep whatever level they currently carry.
#[derive(Clone, Debug)]
pub struct IndexedBusBit<H> {
    handle: H,
    index: u8,
}

impl<H: LineHandle> IndexedBusBit<H> {
    /// Views bit `index` of `handle`.
    ///
    /// Fails if `index` is not below the handle's [`width`](LineHandle::width).
    pub fn new(handle: H, index: u8) -> Result<Self, BitIndexError> {
        let width = handle.width();
        if index >= width {
            return Err(BitIndexError { index, width });
        }
        Ok(Self { handle, index })
    }

    /// Bit position within the bus.
    pub const fn index(&self) -> u8 {
        self.index
    }

    /// The underlying handle.
    pub const fn handle(&self) -> &H {
        &self.handle
    }
}

impl<H: LineHandle> SignalBit for IndexedBusBit<H> {
    #[inline]
    fn get(&self) -> bool {
        (self.handle.value() >> self.index) & 1 != 0
    }

    #[inline]
    fn set(&self, level: bool) {
        let mask = 1u64 << self.index;
        let current = self.handle.value();
        let next = if level { current | mask } else { current & !mask };
        self.handle.drive(next);
    }
}
