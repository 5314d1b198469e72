//! Increment-only counter: the minimal shader revision.

use crate::shader::profile::MinimalMap;
use crate::soc::traits::Peripheral;

/// Holds one word and exposes it plus one.
#[derive(Clone, Copy, Debug, Default)]
pub struct CounterPeripheral {
    map: MinimalMap,
    data: u32,
}

impl CounterPeripheral {
    /// A counter at `map`'s offsets, holding zero.
    pub const fn new(map: MinimalMap) -> Self {
        Self { map, data: 0 }
    }
}

impl Peripheral for CounterPeripheral {
    fn name(&self) -> &str {
        "counter"
    }

    fn read_u32(&mut self, offset: u32) -> u32 {
        match offset {
            o if o == self.map.data => self.data,
            o if o == self.map.incremented => self.data.wrapping_add(1),
            _ => 0,
        }
    }

    fn write_u32(&mut self, offset: u32, val: u32) {
        if offset == self.map.data {
            self.data = val;
        }
    }

    fn reset(&mut self) {
        self.data = 0;
    }

    fn tick(&mut self, _ui_in: u8) -> u8 {
        self.data as u8
    }
}
