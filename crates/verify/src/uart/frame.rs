//! Serial frame geometry.
//!
//! A frame is one start bit (logic 0), eight data bits least-significant first,
//! one stop bit (logic 1), followed by an idle check (logic 1). The idle slot
//! is not part of the ten-bit frame proper.

use crate::common::ProtocolViolation;
use crate::common::constants::UART_DATA_BITS;

/// One slot of a serial frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameSlot {
    /// Start bit, always low.
    Start,
    /// Data bit at the given position (0 = LSB).
    Data(usize),
    /// Stop bit, always high.
    Stop,
    /// Line idle after the stop bit, always high.
    Idle,
}

impl FrameSlot {
    /// The violation reported when a sample in this slot disagrees with `expected`.
    pub const fn violation(self, expected: bool) -> ProtocolViolation {
        match self {
            Self::Start => ProtocolViolation::StartBitNotLow,
            Self::Data(index) => ProtocolViolation::DataBitMismatch {
                index,
                expected: expected as u8,
            },
            Self::Stop => ProtocolViolation::StopBitNotHigh,
            Self::Idle => ProtocolViolation::IdleBitNotHigh,
        }
    }
}

/// The line levels that carry one byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SerialFrame {
    byte: u8,
}

impl SerialFrame {
    /// Frame for `byte`.
    pub const fn new(byte: u8) -> Self {
        Self { byte }
    }

    /// The byte carried.
    pub const fn byte(&self) -> u8 {
        self.byte
    }

    /// Level of data bit `index` (0 = LSB).
    #[inline]
    pub const fn data_bit(&self, index: usize) -> bool {
        (self.byte >> index) & 1 != 0
    }

    /// Every slot of the frame in line order, paired with its level.
    pub fn slots(&self) -> impl Iterator<Item = (FrameSlot, bool)> {
        let frame = *self;
        std::iter::once((FrameSlot::Start, false))
            .chain((0..UART_DATA_BITS).map(move |i| (FrameSlot::Data(i), frame.data_bit(i))))
            .chain([(FrameSlot::Stop, true), (FrameSlot::Idle, true)])
    }

    /// Every level of the frame in line order, idle slot included.
    pub fn levels(&self) -> impl Iterator<Item = bool> {
        self.slots().map(|(_, level)| level)
    }
}
