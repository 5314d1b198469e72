//! Shared pin banks between a testbench and the code driving it.
//!
//! A [`PinBank`] is an 8-bit bus shared through an `Arc`, so line views can
//! be handed out while the testbench itself is mutably borrowed for a bus
//! transaction or a wait. A [`Tap`] exposes one pin of a bank as a
//! standalone single-bit wire.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::common::BitIndexError;
use crate::signal::LineHandle;

/// Pins per bank.
const PINS: u8 = 8;

/// An 8-bit pin bank.
///
/// `bit` and `set_bit` take the pin number modulo 8. Views handed out through
/// [`PinBank::tap`] or [`IndexedBusBit`](crate::signal::IndexedBusBit) reject
/// pins past 7 instead.
#[derive(Clone, Debug, Default)]
pub struct PinBank {
    level: Arc<AtomicU8>,
}

impl PinBank {
    /// A bank with all pins at `initial`.
    pub fn new(initial: u8) -> Self {
        Self {
            level: Arc::new(AtomicU8::new(initial)),
        }
    }

    /// Current levels.
    #[inline]
    pub fn get(&self) -> u8 {
        self.level.load(Ordering::Relaxed)
    }

    /// Drives all pins.
    #[inline]
    pub fn set(&self, value: u8) {
        self.level.store(value, Ordering::Relaxed);
    }

    /// Level of pin `index`.
    #[inline]
    pub fn bit(&self, index: u8) -> bool {
        (self.get() >> (index & 7)) & 1 != 0
    }

    /// Drives pin `index`, leaving the others unchanged.
    pub fn set_bit(&self, index: u8, level: bool) {
        let mask = 1u8 << (index & 7);
        let _ = self
            .level
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| {
                Some(if level { v | mask } else { v & !mask })
            });
    }

    /// Pin `index` as a single wire.
    pub fn tap(&self, index: u8) -> Result<Tap, BitIndexError> {
        if index >= PINS {
            return Err(BitIndexError { index, width: PINS });
        }
        Ok(Tap {
            bank: self.clone(),
            index,
        })
    }
}

impl LineHandle for PinBank {
    fn value(&self) -> u64 {
        u64::from(self.get())
    }

    fn drive(&self, value: u64) {
        self.set(value as u8);
    }

    fn width(&self) -> u8 {
        PINS
    }
}

/// One pin of a [`PinBank`], seen as a one-bit wire.
#[derive(Clone, Debug)]
pub struct Tap {
    bank: PinBank,
    index: u8,
}

impl Tap {
    /// Pin position within the bank.
    pub const fn index(&self) -> u8 {
        self.index
    }
}

impl LineHandle for Tap {
    fn value(&self) -> u64 {
        u64::from(self.bank.bit(self.index))
    }

    fn drive(&self, value: u64) {
        self.bank.set_bit(self.index, value & 1 != 0);
    }

    fn width(&self) -> u8 {
        1
    }
}
