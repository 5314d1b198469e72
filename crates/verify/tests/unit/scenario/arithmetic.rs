//! Arithmetic scenarios against reference units and a mocked bus.

use busbench_core::common::{ArithOp, VerifyError};
use busbench_core::scenario::{TestVectors, check_tolerance, run_arithmetic, run_combinational, run_counter};
use busbench_core::shader::{PeripheralProfile, PollBudget, ShaderDriver};
use mockall::predicate::eq;
use rstest::rstest;

use crate::common::harness::shader_bench;
use crate::common::mocks::bus::MockBus;

#[rstest]
#[case::combinational(PeripheralProfile::combinational())]
#[case::programmable(PeripheralProfile::programmable())]
fn builtin_vectors_pass_with_retention_check(#[case] profile: PeripheralProfile) {
    let mut tb = shader_bench(profile);
    let vectors = TestVectors::builtin();
    let report = run_arithmetic(&mut tb, profile, &vectors, PollBudget::default()).unwrap();
    assert_eq!(report.len(), vectors.pairs.len() + 1);
    assert_eq!(tb.stats().resets, 2);
}

#[test]
fn minimal_profile_falls_back_to_counter() {
    let mut tb = shader_bench(PeripheralProfile::minimal());
    let vectors = TestVectors::new(vec![(41.9, 0.0), (-2.0, 1.0)], 1e-3);
    let report = run_arithmetic(&mut tb, PeripheralProfile::minimal(), &vectors, PollBudget::default()).unwrap();
    assert_eq!(report.name, "counter");
    assert_eq!(report.passed, vec!["0x29 + 1".to_string(), "0x2 + 1".to_string()]);
}

#[test]
fn counter_wraps_at_max() {
    let mut tb = shader_bench(PeripheralProfile::minimal());
    let mut driver = ShaderDriver::new(&mut tb, PeripheralProfile::minimal());
    let report = run_counter(&mut driver, &[0, u32::MAX]).unwrap();
    assert_eq!(report.len(), 2);
}

#[test]
fn tolerance_accepts_rounding_within_epsilon() {
    check_tolerance(ArithOp::Add, 0.1, 0.2, 0.3, 1e-6).unwrap();
    check_tolerance(ArithOp::Mul, 3.0, 0.5, 1.5, 0.0).unwrap();
}

#[test]
fn tolerance_reports_expected_value() {
    let err = check_tolerance(ArithOp::Mul, 2.0, 3.0, 6.5, 1e-3).unwrap_err();
    match err {
        VerifyError::ToleranceExceeded { op, expected, actual, .. } => {
            assert_eq!(op, ArithOp::Mul);
            assert_eq!(expected, 6.0);
            assert_eq!(actual, 6.5);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

/// A combinational unit that computes correctly but loses operand A.
fn forgetful_combinational() -> MockBus {
    let mut bus = MockBus::new();
    let _ = bus.expect_write_word().returning(|_, _| Ok(()));
    let _ = bus.expect_read_word().with(eq(0x08)).returning(|_| Ok(3.0f32.to_bits()));
    let _ = bus.expect_read_word().with(eq(0x0C)).returning(|_| Ok(2.0f32.to_bits()));
    let _ = bus.expect_read_word().with(eq(0x00)).returning(|_| Ok(0));
    bus
}

#[test]
fn lost_operand_is_register_mismatch() {
    let mut bus = forgetful_combinational();
    let mut driver = ShaderDriver::new(&mut bus, PeripheralProfile::combinational());
    let vectors = TestVectors::new(vec![(1.0, 2.0)], 1e-3);
    match run_combinational(&mut driver, &vectors) {
        Err(VerifyError::RegisterMismatch { register, actual, expected }) => {
            assert_eq!(register, "A");
            assert_eq!(actual, 0);
            assert_eq!(expected, 1.0f32.to_bits());
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn wrong_sum_stops_before_product() {
    let mut bus = MockBus::new();
    let _ = bus.expect_write_word().times(2).returning(|_, _| Ok(()));
    let _ = bus.expect_read_word().with(eq(0x08)).times(1).returning(|_| Ok(4.0f32.to_bits()));
    let mut driver = ShaderDriver::new(&mut bus, PeripheralProfile::combinational());
    let vectors = TestVectors::new(vec![(1.0, 2.0), (5.0, 5.0)], 1e-3);
    assert!(matches!(
        run_combinational(&mut driver, &vectors),
        Err(VerifyError::ToleranceExceeded { op: ArithOp::Add, .. })
    ));
}

#[test]
fn combinational_scenario_needs_combinational_profile() {
    let mut bus = MockBus::new();
    let mut driver = ShaderDriver::new(&mut bus, PeripheralProfile::programmable());
    assert!(matches!(
        run_combinational(&mut driver, &TestVectors::builtin()),
        Err(VerifyError::UnsupportedOperation { .. })
    ));
}
