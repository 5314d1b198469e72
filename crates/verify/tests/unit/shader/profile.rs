//! Profile address map tests.

use busbench_core::common::VerifyError;
use busbench_core::shader::{CombinationalMap, MinimalMap, PeripheralProfile, ProgrammableMap};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(0, 0x00)]
#[case(1, 0x04)]
#[case(2, 0x08)]
#[case(3, 0x0C)]
fn combinational_registers(#[case] index: usize, #[case] addr: u32) {
    assert_eq!(PeripheralProfile::combinational().register_address(index).unwrap(), addr);
}

#[rstest]
#[case(0, 0x00)]
#[case(1, 0x04)]
#[case(2, 0x08)]
#[case(3, 0x0C)]
fn programmable_registers(#[case] index: usize, #[case] addr: u32) {
    assert_eq!(PeripheralProfile::programmable().register_address(index).unwrap(), addr);
}

#[test]
fn programmable_defaults() {
    let map = ProgrammableMap::default();
    assert_eq!(map.status, 0x10);
    assert_eq!(map.instruction_memory, 0x20);
    assert_eq!(map.control, 0x3C);
    assert_eq!(map.instruction_slots, 8);
}

#[test]
fn control_register_shadows_last_slot() {
    let map = ProgrammableMap::default();
    assert_eq!(map.usable_slots(), 7);
    assert_eq!(map.slot_address(0).unwrap(), 0x20);
    assert_eq!(map.slot_address(6).unwrap(), 0x38);
    assert!(matches!(
        map.slot_address(7),
        Err(VerifyError::InstructionSlot { slot: 7, slots: 7 })
    ));
}

#[test]
fn control_outside_imem_leaves_all_slots() {
    let map = ProgrammableMap {
        control: 0x14,
        ..ProgrammableMap::default()
    };
    assert_eq!(map.usable_slots(), 8);
    assert_eq!(map.slot_address(7).unwrap(), 0x3C);
}

#[test]
fn register_index_out_of_range() {
    assert!(matches!(
        PeripheralProfile::programmable().register_address(4),
        Err(VerifyError::RegisterIndex(4))
    ));
    assert!(matches!(
        PeripheralProfile::minimal().register_address(2),
        Err(VerifyError::RegisterIndex(2))
    ));
}

#[test]
fn names() {
    let profile = PeripheralProfile::combinational();
    assert_eq!(profile.name(), "combinational");
    assert_eq!(profile.register_name(3), "MUL");
    assert_eq!(PeripheralProfile::programmable().register_name(2), "r2");
    assert_eq!(PeripheralProfile::minimal().register_name(1), "INCREMENTED");
}

#[test]
fn default_profile_is_programmable() {
    assert_eq!(PeripheralProfile::default(), PeripheralProfile::programmable());
}

#[test]
fn profiles_deserialize_by_kind() {
    let profile: PeripheralProfile = serde_json::from_str(r#"{"kind": "combinational"}"#).unwrap();
    assert_eq!(profile, PeripheralProfile::Combinational(CombinationalMap::default()));

    let profile: PeripheralProfile =
        serde_json::from_str(r#"{"kind": "minimal", "incremented": 8}"#).unwrap();
    assert_eq!(
        profile,
        PeripheralProfile::Minimal(MinimalMap {
            data: 0,
            incremented: 8
        })
    );

    let profile: PeripheralProfile =
        serde_json::from_str(r#"{"kind": "programmable", "control": 16, "status": 60}"#).unwrap();
    let map = profile.programmable_map().copied().unwrap();
    assert_eq!(map.control, 0x10);
    assert_eq!(map.status, 0x3C);
    assert_eq!(map.usable_slots(), 8);
}

#[test]
fn unknown_kind_is_rejected() {
    assert!(serde_json::from_str::<PeripheralProfile>(r#"{"kind": "dual"}"#).is_err());
}
