//! UART scenarios end to end on the reference testbench.

use busbench_core::bus::BusPort;
use busbench_core::common::VerifyError;
use busbench_core::common::constants::uart_regs::DIVIDER;
use busbench_core::config::UartConfig;
use busbench_core::scenario::uart::{read_data, receive_pair, set_divider, transmit};
use busbench_core::scenario::{PinRoute, run_basic, run_divider_sweep};

use crate::common::harness::uart_bench;

#[test]
fn basic_scenario_passes_at_default_rate() {
    let mut tb = uart_bench();
    let report = run_basic(&mut tb, &UartConfig::default(), &[0xA5, 0x3C]).unwrap();
    // 2 tx, 2 rx, 1 pair, 4 tx pins, 4 rts pins, 1 alternate rx.
    assert_eq!(report.len(), 14);
    assert!(report.passed.iter().any(|case| case == "rx on ui_in[3]"));
}

#[test]
fn divider_sweep_reprograms_each_rate() {
    let mut tb = uart_bench();
    let report = run_divider_sweep(&mut tb, &UartConfig::default(), &[1_000_000, 57_600], &[0x00, 0xFF]).unwrap();
    assert_eq!(report.passed, vec!["1000000 baud".to_string(), "57600 baud".to_string()]);
    assert_eq!(tb.read_word(DIVIDER).unwrap(), 1111);
    assert!(tb.stats().async_writes >= 2);
}

#[test]
fn set_divider_reads_back() {
    let mut tb = uart_bench();
    let link = set_divider(&mut tb, 1_000_000).unwrap();
    assert_eq!(tb.read_word(DIVIDER).unwrap(), 64);
    transmit(&mut tb, &link, 0x81, PinRoute::BusBit(6), true).unwrap();
}

#[test]
fn empty_fifo_read_is_byte_mismatch() {
    let mut tb = uart_bench();
    assert!(matches!(
        read_data(&mut tb, 0x12),
        Err(VerifyError::ByteMismatch { actual: 0, expected: 0x12 })
    ));
}

#[test]
fn pair_with_wrong_rts_route_fails() {
    let mut tb = uart_bench();
    let link = set_divider(&mut tb, 115_200).unwrap();
    // Pin 2 carries TX, which idles high: "not ready" from the first bit.
    let err = receive_pair(&mut tb, &link, (0x01, 0x02), (PinRoute::Dedicated, 7), PinRoute::BusBit(2)).unwrap_err();
    assert!(matches!(err, VerifyError::Protocol(_)));
}
