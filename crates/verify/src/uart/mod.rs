//! Bit-accurate UART transceiver model.
//!
//! Bytes are framed and sampled one bit period at a time rather than through a
//! byte-level API, because the point is to validate the peripheral's timing:
//! 1. **Receive check** ([`expect_byte`]): samples a transmit line in the middle of every slot.
//! 2. **Transmit** ([`send_byte`]): drives a receive line bit by bit, optionally
//!    checking the peripheral's request-to-send line after every bit.
//!
//! Both operations block the calling flow on [`SimTime::wait`] and fail fast on
//! the first mismatching sample.

/// Frame geometry.
pub mod frame;

use std::time::Duration;

use tracing::{debug, trace};

use crate::common::clock::{BitPeriod, bit_period_from_baud};
use crate::common::{BitClockError, ProtocolViolation};
use crate::signal::{SignalBit, SimTime};

pub use frame::{FrameSlot, SerialFrame};

/// Whether and how [`send_byte`] checks the request-to-send line.
///
/// RTS is active low: logic 0 means the receiver can accept a byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlowControlCheck {
    /// Do not sample RTS.
    Skip,
    /// RTS must stay ready for the whole frame.
    #[default]
    ExpectReady,
    /// RTS must go not-ready once the frame is under way, as it does when an
    /// earlier byte is still unread.
    ExpectNotReady,
}

impl FlowControlCheck {
    /// Level RTS must carry after each bit, if checked.
    pub const fn expected_level(self) -> Option<bool> {
        match self {
            Self::Skip => None,
            Self::ExpectReady => Some(false),
            Self::ExpectNotReady => Some(true),
        }
    }
}

/// Samples `line` for one frame carrying `byte`.
///
/// The start bit is sampled half a period after the call, each data bit and
/// the stop bit one period later each (the stop bit at 9.5 periods), and the
/// idle level half a period after that.
pub fn expect_byte<T, L>(
    time: &mut T,
    line: &L,
    byte: u8,
    period: BitPeriod,
) -> Result<(), ProtocolViolation>
where
    T: SimTime + ?Sized,
    L: SignalBit + ?Sized,
{
    debug!("expect byte {byte:#04x} at {} ns/bit", period.as_nanos());
    for (slot, expected) in SerialFrame::new(byte).slots() {
        let delay = match slot {
            FrameSlot::Start | FrameSlot::Idle => period.half(),
            FrameSlot::Data(_) | FrameSlot::Stop => period.as_duration(),
        };
        time.wait(delay);
        let sampled = line.get();
        trace!(?slot, sampled, expected, at_ns = time.now().as_nanos() as u64, "sample");
        if sampled != expected {
            return Err(slot.violation(expected));
        }
    }
    Ok(())
}

/// Drives one frame carrying `byte` onto `rx`, one full period per bit.
///
/// With a flow-control check, `rts` must read ready before the start bit
/// (check 0), and must carry the check's level after every data bit
/// (checks 1 to 8) and after the stop bit (check 9).
pub fn send_byte<T, R, S>(
    time: &mut T,
    rx: &R,
    rts: &S,
    byte: u8,
    period: BitPeriod,
    flow_control: FlowControlCheck,
) -> Result<(), ProtocolViolation>
where
    T: SimTime + ?Sized,
    R: SignalBit + ?Sized,
    S: SignalBit + ?Sized,
{
    debug!("send byte {byte:#04x} at {} ns/bit, {flow_control:?}", period.as_nanos());
    let expected_rts = flow_control.expected_level();
    let check = |index: usize, expected: bool| -> Result<(), ProtocolViolation> {
        let level = rts.get();
        trace!(index, rts = level, expected, "rts");
        if level == expected {
            Ok(())
        } else {
            Err(ProtocolViolation::FlowControlMismatch {
                index,
                expected: u8::from(expected),
            })
        }
    };

    if expected_rts.is_some() {
        check(0, false)?;
    }

    let frame = SerialFrame::new(byte);
    let mut index = 0;
    for (slot, level) in frame.slots() {
        if slot == FrameSlot::Idle {
            break;
        }
        rx.set(level);
        trace!(?slot, level, "drive");
        time.wait(period.as_duration());
        if slot == FrameSlot::Start {
            continue;
        }
        index += 1;
        if let Some(expected) = expected_rts {
            check(index, expected)?;
        }
    }
    Ok(())
}

/// A serial link with a fixed bit period.
///
/// The period is fixed for the lifetime of the link; build a new link when the
/// baud rate or divider changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UartLink {
    period: BitPeriod,
}

impl UartLink {
    /// Link timed by `period`.
    pub const fn new(period: BitPeriod) -> Self {
        Self { period }
    }

    /// Link timed at `1e9 / baud` nanoseconds per bit.
    pub fn from_baud(baud: u32) -> Result<Self, BitClockError> {
        bit_period_from_baud(baud).map(Self::new)
    }

    /// Bit period of this link.
    pub const fn period(&self) -> BitPeriod {
        self.period
    }

    /// Time one [`expect_byte`] call consumes.
    pub fn frame_duration(&self) -> Duration {
        self.period.as_duration() * 9 + self.period.half() * 2
    }

    /// See [`expect_byte`].
    pub fn expect_byte<T, L>(&self, time: &mut T, line: &L, byte: u8) -> Result<(), ProtocolViolation>
    where
        T: SimTime + ?Sized,
        L: SignalBit + ?Sized,
    {
        expect_byte(time, line, byte, self.period)
    }

    /// See [`send_byte`].
    pub fn send_byte<T, R, S>(
        &self,
        time: &mut T,
        rx: &R,
        rts: &S,
        byte: u8,
        flow_control: FlowControlCheck,
    ) -> Result<(), ProtocolViolation>
    where
        T: SimTime + ?Sized,
        R: SignalBit + ?Sized,
        S: SignalBit + ?Sized,
    {
        send_byte(time, rx, rts, byte, self.period, flow_control)
    }
}
