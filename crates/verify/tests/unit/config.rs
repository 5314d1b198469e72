//! # Configuration Tests
//!
//! Defaults, partial documents and file loading.

use std::io::Write;

use busbench_core::common::VerifyError;
use busbench_core::config::*;
use busbench_core::shader::{PeripheralProfile, PollBudget, ProgrammableMap};
use pretty_assertions::assert_eq;

#[test]
fn test_empty_document_is_default() {
    assert_eq!(Config::from_json_str("{}").unwrap(), Config::default());
}

#[test]
fn test_bench_config_defaults() {
    let bench = BenchConfig::default();
    assert_eq!(bench.clock_hz, 64_000_000);
    assert_eq!(bench.bus_latency_cycles, 4);
    assert_eq!(bench.bus_timeout_cycles, 64);
    assert_eq!(bench.reset_cycles, 10);
}

#[test]
fn test_uart_config_defaults() {
    let uart = UartConfig::default();
    assert_eq!(uart.baud, 115_200);
    assert_eq!(uart.initial_input_state, 0x80);
}

#[test]
fn test_shader_config_defaults() {
    let shader = ShaderConfig::default();
    assert_eq!(shader.profile, PeripheralProfile::programmable());
    assert_eq!(shader.poll, PollBudget::default());
    assert_eq!(shader.cycles_per_instruction, 4);
}

#[test]
fn test_partial_sections_keep_other_defaults() {
    let config = Config::from_json_str(
        r#"{ "bench": { "bus_latency_cycles": 2 }, "shader": { "poll": { "max_polls": 3 } } }"#,
    )
    .unwrap();
    assert_eq!(config.bench.bus_latency_cycles, 2);
    assert_eq!(config.bench.clock_hz, 64_000_000);
    assert_eq!(config.shader.poll.max_polls, 3);
    assert_eq!(config.shader.poll.interval_ns, PollBudget::default().interval_ns);
}

#[test]
fn test_profile_map_override() {
    let config = Config::from_json_str(
        r#"{ "shader": { "profile": { "kind": "programmable", "instruction_slots": 4 } } }"#,
    )
    .unwrap();
    let PeripheralProfile::Programmable(map) = config.shader.profile else {
        panic!("expected programmable profile");
    };
    assert_eq!(map.instruction_slots, 4);
    assert_eq!(map.control, ProgrammableMap::default().control);
    assert_eq!(map.usable_slots(), 4);
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "uart": {{ "baud": 57600 }} }}"#).unwrap();
    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.uart.baud, 57_600);
}

#[test]
fn test_malformed_json_is_config_error() {
    assert!(matches!(
        Config::from_json_str(r#"{ "uart": { "baud": "fast" } }"#),
        Err(VerifyError::Config(_))
    ));
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Config::from_file(dir.path().join("absent.json")),
        Err(VerifyError::Config(_))
    ));
}
