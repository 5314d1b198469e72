//! Bit-period derivation for serial links.
//!
//! A bit period is the simulated duration of one transmitted or sampled bit. It
//! is derived either directly from the baud rate (`1e9 / baud` nanoseconds) or
//! from a source clock and an integer divider (`cycles_per_bit × clock_period`),
//! which is how the peripheral itself times its shift registers.

use std::time::Duration;

use super::error::BitClockError;

/// Nanoseconds per second.
const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Picoseconds per second.
const PICOS_PER_SEC: u128 = 1_000_000_000_000;

/// Duration of a single serial bit. Always strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitPeriod(Duration);

impl BitPeriod {
    /// Wraps a duration, rejecting zero.
    pub fn new(period: Duration) -> Option<Self> {
        (!period.is_zero()).then_some(Self(period))
    }

    /// The full bit period.
    #[inline]
    pub const fn as_duration(self) -> Duration {
        self.0
    }

    /// Half a bit period, truncated to whole nanoseconds.
    ///
    /// Sampling offsets use integer halving so that a sampler and a driver
    /// derived from the same baud rate agree to the nanosecond.
    #[inline]
    pub fn half(self) -> Duration {
        Duration::from_nanos((self.0.as_nanos() / 2) as u64)
    }

    /// The period in whole nanoseconds.
    #[inline]
    pub fn as_nanos(self) -> u64 {
        self.0.as_nanos() as u64
    }
}

impl From<BitPeriod> for Duration {
    fn from(period: BitPeriod) -> Self {
        period.0
    }
}

/// Bit period for `baud_rate`, as `1e9 / baud` whole nanoseconds.
///
/// 9600 baud yields 104166 ns.
pub fn bit_period_from_baud(baud_rate: u32) -> Result<BitPeriod, BitClockError> {
    if baud_rate == 0 {
        return Err(BitClockError::ZeroBaud);
    }
    let nanos = NANOS_PER_SEC / u64::from(baud_rate);
    // Baud rates above 1 GHz truncate to zero nanoseconds.
    BitPeriod::new(Duration::from_nanos(nanos)).ok_or(BitClockError::ZeroDivider {
        baud: baud_rate,
        clock_hz: NANOS_PER_SEC,
    })
}

/// Bit timing derived from a source clock and an integer divider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitClock {
    clock_hz: u64,
}

impl BitClock {
    /// Creates a bit clock driven by a `clock_hz` source.
    pub const fn new(clock_hz: u64) -> Result<Self, BitClockError> {
        if clock_hz == 0 {
            return Err(BitClockError::ZeroClock);
        }
        Ok(Self { clock_hz })
    }

    /// Source clock frequency in hertz.
    #[inline]
    pub const fn clock_hz(&self) -> u64 {
        self.clock_hz
    }

    /// Source clock period in picoseconds, truncated.
    #[inline]
    pub const fn clock_period_ps(&self) -> u64 {
        (PICOS_PER_SEC / self.clock_hz as u128) as u64
    }

    /// Cycles per bit for `baud_rate`: `clock_hz / baud`, truncated.
    pub fn divider(&self, baud_rate: u32) -> Result<u32, BitClockError> {
        if baud_rate == 0 {
            return Err(BitClockError::ZeroBaud);
        }
        let divider = self.clock_hz / u64::from(baud_rate);
        if divider == 0 {
            return Err(BitClockError::ZeroDivider {
                baud: baud_rate,
                clock_hz: self.clock_hz,
            });
        }
        Ok(u32::try_from(divider).unwrap_or(u32::MAX))
    }

    /// Bit period produced by a divider of `cycles_per_bit` source cycles.
    pub fn period_for_divider(&self, cycles_per_bit: u32) -> Result<BitPeriod, BitClockError> {
        let picos = u128::from(cycles_per_bit) * PICOS_PER_SEC / u128::from(self.clock_hz);
        let period = Duration::from_nanos((picos / 1000) as u64);
        BitPeriod::new(period).ok_or(BitClockError::ZeroDivider {
            baud: 0,
            clock_hz: self.clock_hz,
        })
    }

    /// Bit period the peripheral will actually produce for `baud_rate`.
    ///
    /// Differs from [`bit_period_from_baud`] by the divider's truncation error.
    pub fn bit_period(&self, baud_rate: u32) -> Result<BitPeriod, BitClockError> {
        let divider = self.divider(baud_rate)?;
        self.period_for_divider(divider)
    }
}
