//! Driver against the reference shader unit on a testbench.

use std::time::Duration;

use busbench_core::bus::BusPort;
use busbench_core::common::VerifyError;
use busbench_core::shader::{Instruction, PeripheralProfile, PollBudget, ProcessorState, ShaderDriver};
use rstest::rstest;

use crate::common::harness::shader_bench;

#[rstest]
#[case(1.0, 2.0)]
#[case(-1.5, 0.25)]
#[case(3.5e10, -3.5e10)]
#[case(f32::MAX, f32::MAX)]
fn add_program_matches_host(#[case] a: f32, #[case] b: f32) {
    let mut tb = shader_bench(PeripheralProfile::programmable());
    let mut driver = ShaderDriver::new(&mut tb, PeripheralProfile::programmable());
    let sum = driver.run_add_program(a, b, PollBudget::default()).unwrap();
    assert_eq!(sum.to_bits(), (a + b).to_bits());
    assert_eq!(driver.state(), ProcessorState::Halted);
}

#[test]
fn halt_observed_after_a_few_polls() {
    let mut tb = shader_bench(PeripheralProfile::programmable());
    let mut driver = ShaderDriver::new(&mut tb, PeripheralProfile::programmable());
    driver.reset_program_counter().unwrap();
    driver
        .load_program(&[Instruction::fadd(3, 0, 0).unwrap(), Instruction::HALT])
        .unwrap();
    driver.start_execution(true).unwrap();
    let polls = driver.wait_for_halt(PollBudget::default()).unwrap();
    assert!(polls <= 2, "took {polls} polls");
}

#[test]
fn missing_halt_runs_off_imem_and_halts() {
    let mut tb = shader_bench(PeripheralProfile::programmable());
    let mut driver = ShaderDriver::new(&mut tb, PeripheralProfile::programmable());
    driver.reset_program_counter().unwrap();
    driver.write_register(0, 1.0).unwrap();
    let step = Instruction::fadd(0, 0, 0).unwrap();
    driver.load_program(&[step; 7]).unwrap();
    driver.start_execution(true).unwrap();
    let _ = driver.wait_for_halt(PollBudget::default()).unwrap();
    // Seven doublings.
    assert_eq!(driver.read_register(0).unwrap(), 128.0);
}

#[test]
fn never_started_unit_times_out() {
    let mut tb = shader_bench(PeripheralProfile::programmable());
    let mut driver = ShaderDriver::new(&mut tb, PeripheralProfile::programmable());
    let budget = PollBudget::new(5, Duration::from_nanos(100));
    assert!(matches!(
        driver.wait_for_halt(budget),
        Err(VerifyError::DeviceTimeout(_))
    ));
}

#[test]
fn resume_without_pc_reset_stays_on_halt() {
    let mut tb = shader_bench(PeripheralProfile::programmable());
    let mut driver = ShaderDriver::new(&mut tb, PeripheralProfile::programmable());
    let _ = driver.run_add_program(1.0, 1.0, PollBudget::default()).unwrap();
    driver.write_register(2, 0.0).unwrap();
    driver.start_execution(false).unwrap();
    let _ = driver.wait_for_halt(PollBudget::default()).unwrap();
    // The PC still points at the halt, so the add does not run again.
    assert_eq!(driver.read_register(2).unwrap(), 0.0);
}

#[test]
fn resume_runs_program_extended_past_old_halt() {
    let mut tb = shader_bench(PeripheralProfile::programmable());
    let mut driver = ShaderDriver::new(&mut tb, PeripheralProfile::programmable());
    assert_eq!(driver.run_add_program(1.0, 2.0, PollBudget::default()).unwrap(), 3.0);

    // The PC rests on slot 1, where the old halt was.
    driver.write_instruction(1, Instruction::fadd(3, 0, 1).unwrap()).unwrap();
    driver.write_instruction(2, Instruction::fadd(3, 3, 3).unwrap()).unwrap();
    driver.write_instruction(3, Instruction::fadd(3, 3, 3).unwrap()).unwrap();
    driver.write_instruction(4, Instruction::HALT).unwrap();
    driver.start_execution(false).unwrap();
    assert_eq!(driver.state(), ProcessorState::Running);

    let polls = driver.wait_for_halt(PollBudget::default()).unwrap();
    assert!(polls > 1, "stale halt reported on the first poll");
    assert_eq!(driver.state(), ProcessorState::Halted);
    assert_eq!(driver.read_register(3).unwrap(), 12.0);
    // r2 from the first run is untouched.
    assert_eq!(driver.read_register(2).unwrap(), 3.0);
}

#[test]
fn combinational_unit_computes_immediately() {
    let mut tb = shader_bench(PeripheralProfile::combinational());
    let mut driver = ShaderDriver::new(&mut tb, PeripheralProfile::combinational());
    assert_eq!(driver.add(1.25, 2.5).unwrap(), 3.75);
    assert_eq!(driver.mul(1.25, 2.5).unwrap(), 3.125);
    assert_eq!(driver.read_register(0).unwrap(), 1.25);
}

#[test]
fn minimal_unit_increments() {
    let mut tb = shader_bench(PeripheralProfile::minimal());
    let mut driver = ShaderDriver::new(&mut tb, PeripheralProfile::minimal());
    assert_eq!(driver.increment(41).unwrap(), 42);
    assert_eq!(driver.increment(u32::MAX).unwrap(), 0);
}

#[test]
fn out_of_window_address_times_out() {
    let mut tb = shader_bench(PeripheralProfile::programmable());
    assert!(tb.read_word(0x40).is_err());
    assert_eq!(tb.stats().timeouts, 1);
}
