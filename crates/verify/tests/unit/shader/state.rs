//! Status and control flag tests.

use std::time::Duration;

use busbench_core::shader::{ControlFlags, PollBudget, ProcessorState, StatusFlags};

#[test]
fn status_bits() {
    let status = StatusFlags::from_raw(0b10);
    assert!(status.halted());
    assert!(!status.running());
    assert!(StatusFlags::from_raw(0b01).running());
}

#[test]
fn control_encodings() {
    assert_eq!(ControlFlags::start(true).encode(), 0b11);
    assert_eq!(ControlFlags::start(false).encode(), 0b01);
    assert_eq!(ControlFlags::reset_pc().encode(), 0b10);
    assert_eq!(ControlFlags::stop().encode(), 0);
    assert_eq!(ControlFlags::decode(0b11), ControlFlags::start(true));
}

#[test]
fn poll_budget_defaults() {
    let budget = PollBudget::default();
    assert_eq!(budget.max_polls, 100_000);
    assert_eq!(budget.interval(), Duration::from_micros(1));
    assert_eq!(PollBudget::new(5, Duration::from_nanos(250)).interval_ns, 250);
}

#[test]
fn state_display() {
    assert_eq!(ProcessorState::default(), ProcessorState::Idle);
    assert_eq!(ProcessorState::Halted.to_string(), "halted");
}
