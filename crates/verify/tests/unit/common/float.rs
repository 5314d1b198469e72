//! Float codec tests.
//!
//! Bit patterns must survive encode/decode unchanged for every non-NaN value,
//! and NaN must never pass a tolerance comparison.

use busbench_core::common::FloatValue;
use busbench_core::common::float::{
    CANONICAL_NAN_F32, from_bits, is_canonical_nan, is_nan_bits, to_bits, within_epsilon,
};
use proptest::prelude::*;

#[test]
fn known_encodings() {
    assert_eq!(to_bits(1.0), 0x3f80_0000);
    assert_eq!(to_bits(-2.0), 0xc000_0000);
    assert_eq!(to_bits(0.0), 0);
    assert_eq!(to_bits(-0.0), 0x8000_0000);
    assert_eq!(from_bits(0x4049_0fdb), std::f32::consts::PI);
}

#[test]
fn infinities_round_trip() {
    assert_eq!(from_bits(to_bits(f32::INFINITY)), f32::INFINITY);
    assert_eq!(from_bits(to_bits(f32::NEG_INFINITY)), f32::NEG_INFINITY);
}

#[test]
fn nan_classification() {
    assert!(is_nan_bits(CANONICAL_NAN_F32));
    assert!(is_nan_bits(to_bits(f32::NAN)));
    assert!(is_nan_bits(0x7f80_0001));
    assert!(!is_nan_bits(0x7f80_0000));
    assert!(!is_canonical_nan(0x7f80_0001));
}

#[test]
fn payload_nan_only_guaranteed_to_stay_nan() {
    // Signalling NaN with a payload. Through an `f32` only NaN-ness is
    // promised: a platform may quiet it or canonicalize the payload.
    let raw = 0x7fa0_0001;
    assert!(!is_canonical_nan(raw));
    assert!(from_bits(raw).is_nan());
    assert!(is_nan_bits(to_bits(from_bits(raw))));

    // The register view never goes through an `f32` and keeps the word.
    let value = FloatValue::from_bits(raw);
    assert_eq!(value.bits(), raw);
    assert!(value.is_nan());
    assert!(value.value().is_nan());
}

#[test]
fn nan_never_within_epsilon() {
    assert!(!within_epsilon(f32::NAN, f32::NAN, 1.0));
    assert!(!within_epsilon(f32::NAN, 1.0, f32::INFINITY));
    assert!(!within_epsilon(1.0, f32::NAN, f32::INFINITY));
}

#[test]
fn epsilon_bound_is_strict() {
    assert!(within_epsilon(1.0, 1.25, 0.5));
    assert!(!within_epsilon(1.0, 1.5, 0.5));
    assert!(within_epsilon(f32::INFINITY, f32::INFINITY, 1e-6));
    assert!(!within_epsilon(f32::INFINITY, f32::NEG_INFINITY, 1e-6));
}

#[test]
fn float_value_display_shows_both_views() {
    assert_eq!(FloatValue::from_f32(1.0).to_string(), "1 (0x3f800000)");
}

#[test]
fn float_value_equality_is_bitwise() {
    assert_ne!(FloatValue::from_f32(0.0), FloatValue::from_f32(-0.0));
    let nan = FloatValue::from_bits(0x7fc0_1234);
    assert_eq!(nan, FloatValue::from_bits(0x7fc0_1234));
    assert!(nan.is_nan());
}

proptest! {
    #[test]
    fn non_nan_bits_round_trip(bits in any::<u32>().prop_filter("not NaN", |b| !is_nan_bits(*b))) {
        prop_assert_eq!(to_bits(from_bits(bits)), bits);
    }

    #[test]
    fn finite_values_round_trip(value in any::<f32>().prop_filter("finite", |v| v.is_finite())) {
        prop_assert_eq!(from_bits(to_bits(value)).to_bits(), value.to_bits());
        prop_assert!(within_epsilon(from_bits(to_bits(value)), value, f32::MIN_POSITIVE));
    }
}
