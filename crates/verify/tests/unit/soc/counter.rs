use busbench_core::common::constants::shader_regs::{MIN_DATA, MIN_INCREMENTED};
use busbench_core::shader::profile::MinimalMap;
use busbench_core::soc::Peripheral;
use busbench_core::soc::devices::CounterPeripheral;

#[test]
fn exposes_data_plus_one() {
    let mut counter = CounterPeripheral::new(MinimalMap::default());
    counter.write_u32(MIN_DATA, 41);
    assert_eq!(counter.read_u32(MIN_DATA), 41);
    assert_eq!(counter.read_u32(MIN_INCREMENTED), 42);
}

#[test]
fn increment_wraps() {
    let mut counter = CounterPeripheral::new(MinimalMap::default());
    counter.write_u32(MIN_DATA, u32::MAX);
    assert_eq!(counter.read_u32(MIN_INCREMENTED), 0);
}

#[test]
fn incremented_register_ignores_writes() {
    let mut counter = CounterPeripheral::new(MinimalMap::default());
    counter.write_u32(MIN_INCREMENTED, 9);
    assert_eq!(counter.read_u32(MIN_DATA), 0);
    counter.write_u32(MIN_DATA, 5);
    counter.reset();
    assert_eq!(counter.read_u32(MIN_INCREMENTED), 1);
}
