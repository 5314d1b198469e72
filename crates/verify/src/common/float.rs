//! IEEE 754 single-precision value/bit-pattern views.
//!
//! Registers on the bus are plain 32-bit words; the shader unit interprets them
//! as single-precision floats. A value and its bit pattern are two views of the
//! same datum:
//!
//! - **Encoding** ([`to_bits`]) and **decoding** ([`from_bits`]) are total.
//! - Finite values and infinities round-trip bit-for-bit.
//! - NaN payloads are passed through opaquely; they are never compared
//!   numerically ([`within_epsilon`] treats any NaN as a mismatch).

/// Canonical quiet NaN for IEEE 754 single-precision (positive, quiet, zero payload).
pub const CANONICAL_NAN_F32: u32 = 0x7fc0_0000;

/// Exponent field mask for single-precision.
const EXPONENT_MASK: u32 = 0x7f80_0000;

/// Mantissa field mask for single-precision.
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Encodes `value` as its 32-bit IEEE 754 pattern.
#[inline]
pub const fn to_bits(value: f32) -> u32 {
    value.to_bits()
}

/// Decodes a 32-bit IEEE 754 pattern.
#[inline]
pub const fn from_bits(bits: u32) -> f32 {
    f32::from_bits(bits)
}

/// Returns `true` if `bits` encodes a NaN.
#[inline]
pub const fn is_nan_bits(bits: u32) -> bool {
    (bits & EXPONENT_MASK) == EXPONENT_MASK && (bits & MANTISSA_MASK) != 0
}

/// Returns `true` if `bits` is the canonical quiet NaN.
#[inline]
pub const fn is_canonical_nan(bits: u32) -> bool {
    bits == CANONICAL_NAN_F32
}

/// `|actual - expected| < epsilon`, with any NaN operand counting as a mismatch.
#[inline]
pub fn within_epsilon(actual: f32, expected: f32, epsilon: f32) -> bool {
    if actual.is_nan() || expected.is_nan() {
        return false;
    }
    if actual == expected {
        // Covers matching infinities, whose difference is NaN.
        return true;
    }
    (actual - expected).abs() < epsilon
}

/// A single-precision datum carried in a 32-bit register.
///
/// Equality is bitwise, so two NaNs with the same payload compare equal and
/// `0.0` differs from `-0.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FloatValue {
    bits: u32,
}

impl FloatValue {
    /// Wraps a float.
    #[inline]
    pub const fn from_f32(value: f32) -> Self {
        Self {
            bits: to_bits(value),
        }
    }

    /// Wraps a raw register word.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Float view.
    #[inline]
    pub const fn value(self) -> f32 {
        from_bits(self.bits)
    }

    /// Bit-pattern view.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// Returns `true` if the pattern encodes a NaN.
    #[inline]
    pub const fn is_nan(self) -> bool {
        is_nan_bits(self.bits)
    }
}

impl From<f32> for FloatValue {
    fn from(value: f32) -> Self {
        Self::from_f32(value)
    }
}

impl From<FloatValue> for f32 {
    fn from(value: FloatValue) -> Self {
        value.value()
    }
}

impl std::fmt::Display for FloatValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:#010x})", self.value(), self.bits)
    }
}
