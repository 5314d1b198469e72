//! Clocked testbench hosting one peripheral model.
//!
//! The testbench owns the peripheral, its `ui_in`/`uo_out` pin banks and the
//! simulated clock. It performs:
//! 1. **Time:** [`SimTime::wait`] ticks the peripheral on every rising edge
//!    crossed; time is kept in picoseconds.
//! 2. **Bus:** [`BusPort`] transactions against the peripheral, each costing
//!    `bus_latency_cycles` clocks. Addresses outside the peripheral window
//!    never acknowledge and time out after `bus_timeout_cycles`.
//! 3. **Reset:** Holds the input pins at a given state for `reset_cycles`.

use std::fmt;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::bus::BusPort;
use crate::common::constants::{PERIPHERAL_WINDOW, UART_RESET_BAUD};
use crate::common::{BitClock, DeviceTimeout, Result, TimeoutBudget};
use crate::config::{BenchConfig, ShaderConfig};
use crate::signal::SimTime;
use crate::soc::devices::{self, Peripheral, UartPeripheral};
use crate::soc::pins::PinBank;
use crate::stats::BusStats;

const PICOS_PER_NANO: u64 = 1_000;

/// A peripheral on a clock, with pins and a register bus.
pub struct Testbench {
    peripheral: Box<dyn Peripheral>,
    clock: BitClock,
    latency_cycles: u64,
    timeout_cycles: u64,
    reset_cycles: u64,
    ui_in: PinBank,
    uo_out: PinBank,
    /// Current time in picoseconds.
    now_ps: u64,
    /// Time of the next rising edge in picoseconds.
    next_edge_ps: u64,
    stats: BusStats,
}

impl Testbench {
    /// Hosts `peripheral` on the clock and bus described by `config`.
    pub fn new(peripheral: Box<dyn Peripheral>, config: &BenchConfig) -> Result<Self> {
        let clock = BitClock::new(config.clock_hz)?;
        Ok(Self {
            peripheral,
            clock,
            latency_cycles: config.bus_latency_cycles,
            timeout_cycles: config.bus_timeout_cycles,
            reset_cycles: config.reset_cycles,
            ui_in: PinBank::default(),
            uo_out: PinBank::default(),
            now_ps: 0,
            next_edge_ps: clock.clock_period_ps().max(1),
            stats: BusStats::default(),
        })
    }

    /// A testbench hosting a UART that comes out of reset at 115200 baud.
    pub fn uart(config: &BenchConfig) -> Result<Self> {
        let clock = BitClock::new(config.clock_hz)?;
        let uart = UartPeripheral::new(clock.divider(UART_RESET_BAUD)?);
        Self::new(Box::new(uart), config)
    }

    /// A testbench hosting the shader revision selected by `shader`.
    pub fn shader(bench: &BenchConfig, shader: &ShaderConfig) -> Result<Self> {
        let peripheral = devices::for_profile(shader.profile, shader.cycles_per_instruction);
        Self::new(peripheral, bench)
    }

    /// Input pins, driven by the test.
    pub const fn ui_in(&self) -> &PinBank {
        &self.ui_in
    }

    /// Output pins, driven by the peripheral.
    pub const fn uo_out(&self) -> &PinBank {
        &self.uo_out
    }

    /// The source clock.
    pub const fn clock(&self) -> BitClock {
        self.clock
    }

    /// Clock cycles simulated so far.
    pub const fn cycles(&self) -> u64 {
        self.stats.cycles
    }

    /// Traffic counters.
    pub const fn stats(&self) -> &BusStats {
        &self.stats
    }

    /// Name of the hosted peripheral.
    pub fn peripheral_name(&self) -> &str {
        self.peripheral.name()
    }

    fn period_ps(&self) -> u64 {
        self.clock.clock_period_ps().max(1)
    }

    fn edge(&mut self) {
        let uo_out = self.peripheral.tick(self.ui_in.get());
        self.uo_out.set(uo_out);
        self.stats.cycles += 1;
        self.next_edge_ps += self.period_ps();
    }

    fn advance_ps(&mut self, picos: u64) {
        let target = self.now_ps.saturating_add(picos);
        while self.next_edge_ps <= target {
            self.now_ps = self.next_edge_ps;
            self.edge();
        }
        self.now_ps = target;
    }

    /// Runs `cycles` full clock cycles.
    pub fn run_cycles(&mut self, cycles: u64) {
        let picos = cycles.saturating_mul(self.period_ps());
        self.advance_ps(picos);
    }

    fn acknowledge(&mut self, kind: &str, addr: u32) -> Result<(), DeviceTimeout> {
        if addr < PERIPHERAL_WINDOW {
            return Ok(());
        }
        self.run_cycles(self.timeout_cycles);
        self.stats.timeouts += 1;
        warn!("{kind} at {addr:#x}: no acknowledge in {} cycles", self.timeout_cycles);
        Err(DeviceTimeout {
            waiting_for: format!("{kind} acknowledge at {addr:#x}"),
            budget: TimeoutBudget::Cycles(self.timeout_cycles),
        })
    }

    fn settle(&mut self) {
        self.run_cycles(self.latency_cycles);
    }
}

impl BusPort for Testbench {
    fn read_word(&mut self, addr: u32) -> Result<u32, DeviceTimeout> {
        self.acknowledge("word read", addr)?;
        let value = self.peripheral.read_u32(addr);
        self.settle();
        self.stats.word_reads += 1;
        trace!("bus: read_word {addr:#04x} -> {value:#010x}");
        Ok(value)
    }

    fn write_word(&mut self, addr: u32, value: u32) -> Result<(), DeviceTimeout> {
        self.acknowledge("word write", addr)?;
        self.peripheral.write_u32(addr, value);
        self.settle();
        self.stats.word_writes += 1;
        trace!("bus: write_word {addr:#04x} <- {value:#010x}");
        Ok(())
    }

    fn read_byte(&mut self, addr: u32) -> Result<u8, DeviceTimeout> {
        self.acknowledge("byte read", addr)?;
        let value = self.peripheral.read_u8(addr);
        self.settle();
        self.stats.byte_reads += 1;
        trace!("bus: read_byte {addr:#04x} -> {value:#04x}");
        Ok(value)
    }

    fn write_byte(&mut self, addr: u32, value: u8, synchronous: bool) -> Result<(), DeviceTimeout> {
        if synchronous {
            self.acknowledge("byte write", addr)?;
        } else if addr >= PERIPHERAL_WINDOW {
            // Nobody waits for the acknowledge, so nobody notices it missing.
            warn!("async byte write to {addr:#x} dropped");
            self.stats.byte_writes += 1;
            self.stats.async_writes += 1;
            return Ok(());
        }
        self.peripheral.write_u8(addr, value);
        self.stats.byte_writes += 1;
        if synchronous {
            self.settle();
        } else {
            self.stats.async_writes += 1;
        }
        trace!("bus: write_byte {addr:#04x} <- {value:#04x} (sync {synchronous})");
        Ok(())
    }

    fn reset(&mut self, initial_input_state: u8) -> Result<(), DeviceTimeout> {
        debug!(
            "reset {} with ui_in = {initial_input_state:#04x} for {} cycles",
            self.peripheral.name(),
            self.reset_cycles
        );
        self.ui_in.set(initial_input_state);
        self.peripheral.reset();
        self.run_cycles(self.reset_cycles);
        self.stats.resets += 1;
        Ok(())
    }
}

impl SimTime for Testbench {
    fn wait(&mut self, duration: Duration) {
        let picos = u64::try_from(duration.as_nanos())
            .unwrap_or(u64::MAX)
            .saturating_mul(PICOS_PER_NANO);
        self.advance_ps(picos);
    }

    fn now(&self) -> Duration {
        Duration::from_nanos(self.now_ps / PICOS_PER_NANO)
    }
}

impl fmt::Debug for Testbench {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Testbench")
            .field("peripheral", &self.peripheral.name())
            .field("clock_hz", &self.clock.clock_hz())
            .field("now_ps", &self.now_ps)
            .field("ui_in", &self.ui_in.get())
            .field("uo_out", &self.uo_out.get())
            .field("stats", &self.stats)
            .finish()
    }
}
