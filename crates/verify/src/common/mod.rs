//! Common utilities and types used throughout the verification core.
//!
//! This module provides the leaf building blocks shared by the link models and
//! the driver. It includes:
//! 1. **Bit timing:** Bit-period derivation from baud rates and clock dividers.
//! 2. **Float codec:** IEEE 754 single-precision value/bit-pattern views.
//! 3. **Constants:** Frame geometry, register offsets, and status/control bits.
//! 4. **Error Handling:** The error taxonomy surfaced by every operation.

/// Bit-period derivation.
pub mod clock;

/// Frame geometry, register maps, and flag bits.
pub mod constants;

/// Error types.
pub mod error;

/// Single-precision float encode/decode.
pub mod float;

pub use clock::{BitClock, BitPeriod, bit_period_from_baud};
pub use error::{
    ArithOp, BitClockError, BitIndexError, DeviceTimeout, ProtocolViolation, Result, TimeoutBudget,
    VerifyError,
};
pub use float::FloatValue;
