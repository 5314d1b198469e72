//! Reference system the verification core runs against.
//!
//! This module organizes the components that stand in for the simulated
//! device: the peripheral models, the pin banks they are wired to, and the
//! clocked testbench that hosts one of them behind a register bus.

/// Peripheral models.
pub mod devices;

/// Shared pin banks and single-pin taps.
pub mod pins;

/// Clocked host implementing the bus and simulated time.
pub mod testbench;

/// Peripheral trait definitions.
pub mod traits;

pub use pins::{PinBank, Tap};
pub use testbench::Testbench;
pub use traits::Peripheral;
