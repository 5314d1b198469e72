//! Arithmetic checks against the shader peripheral.
//!
//! The host reference is computed in single precision on the narrowed
//! operands, so an exact device matches bit-for-bit and epsilon only absorbs
//! rounding differences in the hardware.

use tracing::{info, warn};

use crate::bus::BusPort;
use crate::common::float::within_epsilon;
use crate::common::{ArithOp, FloatValue, Result, VerifyError};
use crate::shader::{PeripheralProfile, PollBudget, ShaderDriver};
use crate::signal::SimTime;

use super::{ScenarioReport, TestVectors};

/// Input pins during a shader reset.
const SHADER_RESET_INPUTS: u8 = 0x00;

/// Host single-precision reference for `a op b`.
pub fn reference(op: ArithOp, a: f32, b: f32) -> f32 {
    match op {
        ArithOp::Add => a + b,
        ArithOp::Mul => a * b,
    }
}

/// Checks a device result against the host reference.
pub fn check_tolerance(op: ArithOp, a: f32, b: f32, actual: f32, epsilon: f32) -> Result<()> {
    let expected = reference(op, a, b);
    if within_epsilon(actual, expected, epsilon) {
        return Ok(());
    }
    warn!("{a} {op} {b}: got {actual}, expected {expected}");
    Err(VerifyError::ToleranceExceeded {
        op,
        a,
        b,
        actual,
        expected,
        epsilon,
    })
}

fn check_retained<B: BusPort + ?Sized>(
    driver: &mut ShaderDriver<'_, B>,
    index: usize,
    written: f32,
) -> Result<()> {
    let expected = FloatValue::from_f32(written).bits();
    let actual = driver.read_register_bits(index)?.bits();
    if actual != expected {
        return Err(VerifyError::RegisterMismatch {
            register: driver.profile().register_name(index),
            actual,
            expected,
        });
    }
    Ok(())
}

/// Runs every pair through the combinational ADD and MUL outputs.
///
/// Each pair is written once and both results are read back. Afterwards
/// operand A must still hold the last pair's first operand.
pub fn run_combinational<B: BusPort + ?Sized>(
    driver: &mut ShaderDriver<'_, B>,
    vectors: &TestVectors,
) -> Result<ScenarioReport> {
    if !matches!(driver.profile(), PeripheralProfile::Combinational(_)) {
        return Err(VerifyError::UnsupportedOperation {
            profile: driver.profile().name(),
            operation: "combinational arithmetic",
        });
    }
    let mut report = ScenarioReport::new("combinational");
    let epsilon = vectors.epsilon_f32();
    let mut last_a = None;
    for (a, b) in vectors.pairs_f32() {
        driver.write_register(0, a)?;
        driver.write_register(1, b)?;
        let sum = driver.read_register(2)?;
        check_tolerance(ArithOp::Add, a, b, sum, epsilon)?;
        let product = driver.read_register(3)?;
        check_tolerance(ArithOp::Mul, a, b, product, epsilon)?;
        report.pass(format!("{a} + {b} = {sum}, {a} * {b} = {product}"));
        last_a = Some(a);
    }
    if let Some(a) = last_a {
        check_retained(driver, 0, a)?;
        report.pass("operand A retained");
    }
    Ok(report)
}

/// Runs every pair through the one-instruction add program.
///
/// Afterwards `r0` must still hold the last pair's first operand.
pub fn run_programmable<B: BusPort + SimTime + ?Sized>(
    driver: &mut ShaderDriver<'_, B>,
    vectors: &TestVectors,
    budget: PollBudget,
) -> Result<ScenarioReport> {
    let mut report = ScenarioReport::new("programmable");
    let epsilon = vectors.epsilon_f32();
    let mut last_a = None;
    for (a, b) in vectors.pairs_f32() {
        let sum = driver.run_add_program(a, b, budget)?;
        check_tolerance(ArithOp::Add, a, b, sum, epsilon)?;
        report.pass(format!("fadd {a}, {b} = {sum}"));
        last_a = Some(a);
    }
    if let Some(a) = last_a {
        check_retained(driver, 0, a)?;
        report.pass("r0 retained");
    }
    Ok(report)
}

/// Checks the minimal revision's increment output for each value.
pub fn run_counter<B: BusPort + ?Sized>(
    driver: &mut ShaderDriver<'_, B>,
    values: &[u32],
) -> Result<ScenarioReport> {
    let mut report = ScenarioReport::new("counter");
    for &value in values {
        let actual = driver.increment(value)?;
        let expected = value.wrapping_add(1);
        if actual != expected {
            warn!("increment {value:#x}: got {actual:#x}");
            return Err(VerifyError::RegisterMismatch {
                register: driver.profile().register_name(1),
                actual,
                expected,
            });
        }
        report.pass(format!("{value:#x} + 1"));
    }
    Ok(report)
}

/// Resets the device and runs the scenario matching `profile`.
///
/// The minimal revision has no arithmetic; it gets the counter check over
/// the integer parts of the first operands instead.
pub fn run_arithmetic<B: BusPort + SimTime + ?Sized>(
    bus: &mut B,
    profile: PeripheralProfile,
    vectors: &TestVectors,
    budget: PollBudget,
) -> Result<ScenarioReport> {
    info!("arithmetic on {} profile, {} pairs", profile.name(), vectors.pairs.len());
    bus.reset(SHADER_RESET_INPUTS)?;
    let mut driver = ShaderDriver::new(bus, profile);
    match profile {
        PeripheralProfile::Combinational(_) => run_combinational(&mut driver, vectors),
        PeripheralProfile::Programmable(_) => run_programmable(&mut driver, vectors, budget),
        PeripheralProfile::Minimal(_) => {
            let values: Vec<u32> = vectors.pairs.iter().map(|&(a, _)| a.abs() as u32).collect();
            run_counter(&mut driver, &values)
        }
    }
}
