//! Reference models of the peripherals under test.
//!
//! Each model implements [`Peripheral`] and is hosted by a
//! [`Testbench`](crate::soc::testbench::Testbench).

/// Increment-only counter (minimal shader revision).
pub mod counter;

/// Shader processor (combinational and programmable revisions).
pub mod shader;

/// UART with RTS flow control.
pub mod uart;

pub use counter::CounterPeripheral;
pub use shader::ShaderUnit;
pub use uart::UartPeripheral;

pub use crate::soc::traits::Peripheral;

use crate::shader::PeripheralProfile;

/// Builds the reference model implementing `profile`.
pub fn for_profile(profile: PeripheralProfile, cycles_per_instruction: u32) -> Box<dyn Peripheral> {
    match profile {
        PeripheralProfile::Combinational(map) => Box::new(ShaderUnit::combinational(map)),
        PeripheralProfile::Programmable(map) => {
            Box::new(ShaderUnit::programmable(map, cycles_per_instruction))
        }
        PeripheralProfile::Minimal(map) => Box::new(CounterPeripheral::new(map)),
    }
}
