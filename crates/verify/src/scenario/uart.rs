//! UART scenarios against a hosted UART peripheral.
//!
//! Signals are reached either through a dedicated single-pin tap or as one bit
//! of the packed `ui_in`/`uo_out` buses, so both line views the link models
//! accept get exercised.

use tracing::{info, warn};

use crate::bus::BusPort;
use crate::common::constants::uart_regs::{DATA, DIVIDER, RX_ALT_PIN, RX_PIN, RX_SELECT};
use crate::common::{Result, VerifyError};
use crate::config::UartConfig;
use crate::signal::{IndexedBusBit, SignalBit, SingleLine};
use crate::soc::{PinBank, Testbench};
use crate::uart::{FlowControlCheck, UartLink};

use super::ScenarioReport;

/// Default TX output pin.
const TX_PIN: u8 = 0;

/// Default RTS output pin.
const RTS_PIN: u8 = 1;

/// Baud rates of the divider sweep.
pub const SWEEP_BAUDS: [u32; 3] = [9_600, 1_000_000, 57_600];

/// Byte the divider sweep transmits at each rate.
pub const SWEEP_TX_BYTE: u8 = 0x54;

/// How a UART signal is reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinRoute {
    /// The signal's own pin, as a single wire.
    Dedicated,
    /// Bit `n` of the packed pin bus.
    BusBit(u8),
}

impl PinRoute {
    fn line(self, bank: &PinBank, dedicated: u8) -> Result<Box<dyn SignalBit>> {
        let line: Box<dyn SignalBit> = match self {
            Self::Dedicated => Box::new(SingleLine::new(bank.tap(dedicated)?)),
            Self::BusBit(index) => Box::new(IndexedBusBit::new(bank.clone(), index)?),
        };
        Ok(line)
    }
}

/// Writes `byte` to the data register and checks the frame on the TX pin.
pub fn transmit(
    tb: &mut Testbench,
    link: &UartLink,
    byte: u8,
    tx: PinRoute,
    synchronous: bool,
) -> Result<()> {
    let line = tx.line(tb.uo_out(), TX_PIN)?;
    tb.write_byte(DATA, byte, synchronous)?;
    link.expect_byte(tb, &*line, byte)?;
    Ok(())
}

/// Drives one frame into the receiver.
pub fn receive(
    tb: &mut Testbench,
    link: &UartLink,
    byte: u8,
    rx: (PinRoute, u8),
    rts: PinRoute,
    flow_control: FlowControlCheck,
) -> Result<()> {
    let rx_line = rx.0.line(tb.ui_in(), rx.1)?;
    let rts_line = rts.line(tb.uo_out(), RTS_PIN)?;
    link.send_byte(tb, &*rx_line, &*rts_line, byte, flow_control)?;
    Ok(())
}

/// Reads the data register and compares it to `expected`.
pub fn read_data(tb: &mut Testbench, expected: u8) -> Result<()> {
    let actual = tb.read_byte(DATA)?;
    if actual != expected {
        warn!("UART RX read {actual:#04x}, sent {expected:#04x}");
        return Err(VerifyError::ByteMismatch { actual, expected });
    }
    Ok(())
}

/// Sends two bytes without reading in between.
///
/// RTS must stay ready for the first and go not-ready during the second,
/// after which both bytes read back in order.
pub fn receive_pair(
    tb: &mut Testbench,
    link: &UartLink,
    bytes: (u8, u8),
    rx: (PinRoute, u8),
    rts: PinRoute,
) -> Result<()> {
    receive(tb, link, bytes.0, rx, rts, FlowControlCheck::ExpectReady)?;
    receive(tb, link, bytes.1, rx, rts, FlowControlCheck::ExpectNotReady)?;
    read_data(tb, bytes.0)?;
    read_data(tb, bytes.1)
}

/// Programs the divider for `baud` and returns a link at the matching rate.
pub fn set_divider(tb: &mut Testbench, baud: u32) -> Result<UartLink> {
    let divider = tb.clock().divider(baud)?;
    info!("{baud} baud, divider {divider}");
    tb.write_word(DIVIDER, divider)?;
    let actual = tb.read_word(DIVIDER)?;
    if actual != divider {
        return Err(VerifyError::RegisterMismatch {
            register: "DIVIDER",
            actual,
            expected: divider,
        });
    }
    Ok(UartLink::from_baud(baud)?)
}

fn check_rx_select(tb: &mut Testbench, alternative: bool) -> Result<()> {
    let expected = u8::from(alternative);
    let actual = tb.read_byte(RX_SELECT)?;
    if actual != expected {
        return Err(VerifyError::RegisterMismatch {
            register: "RX_SELECT",
            actual: u32::from(actual),
            expected: u32::from(expected),
        });
    }
    Ok(())
}

fn select_rx(tb: &mut Testbench, alternative: bool) -> Result<()> {
    tb.write_byte(RX_SELECT, u8::from(alternative), true)?;
    check_rx_select(tb, alternative)
}

fn pair_at(bytes: &[u8], i: usize) -> (u8, u8) {
    let n = bytes.len().max(1);
    let at = |k: usize| bytes.get(k % n).copied().unwrap_or(0);
    (at(i), at(i + 1).rotate_left(3))
}

/// Transmit, receive, flow control and pin routing at the configured rate.
///
/// `bytes` supplies the payloads; each phase cycles through it.
pub fn run_basic(tb: &mut Testbench, config: &UartConfig, bytes: &[u8]) -> Result<ScenarioReport> {
    let mut report = ScenarioReport::new("uart basic");
    tb.reset(config.initial_input_state)?;
    let link = set_divider(tb, config.baud)?;
    let default_rx = (PinRoute::Dedicated, RX_PIN);

    for &byte in bytes {
        transmit(tb, &link, byte, PinRoute::Dedicated, true)?;
        report.pass(format!("tx {byte:#04x}"));
    }

    for &byte in bytes {
        receive(tb, &link, byte, default_rx, PinRoute::Dedicated, FlowControlCheck::ExpectReady)?;
        read_data(tb, byte)?;
        report.pass(format!("rx {byte:#04x}"));
    }

    let pair = pair_at(bytes, 0);
    receive_pair(tb, &link, pair, default_rx, PinRoute::Dedicated)?;
    report.pass(format!("rts on unread {:#04x}, {:#04x}", pair.0, pair.1));

    for (i, pin) in (0..8).step_by(2).enumerate() {
        let byte = pair_at(bytes, i).0;
        transmit(tb, &link, byte, PinRoute::BusBit(pin), true)?;
        report.pass(format!("tx {byte:#04x} on uo_out[{pin}]"));
    }

    for (i, pin) in (1..8).step_by(2).enumerate() {
        let pair = pair_at(bytes, i);
        receive_pair(tb, &link, pair, default_rx, PinRoute::BusBit(pin))?;
        report.pass(format!("rts on uo_out[{pin}]"));
    }

    check_rx_select(tb, false)?;
    tb.ui_in().set_bit(RX_ALT_PIN, true);
    select_rx(tb, true)?;
    let pair = pair_at(bytes, 1);
    receive_pair(tb, &link, pair, (PinRoute::BusBit(RX_ALT_PIN), RX_ALT_PIN), PinRoute::Dedicated)?;
    report.pass(format!("rx on ui_in[{RX_ALT_PIN}]"));

    Ok(report)
}

/// Reprograms the divider for each rate and checks TX and paired RX there.
///
/// The TX byte is written without waiting for the acknowledge.
pub fn run_divider_sweep(
    tb: &mut Testbench,
    config: &UartConfig,
    bauds: &[u32],
    bytes: &[u8],
) -> Result<ScenarioReport> {
    let mut report = ScenarioReport::new("uart divider");
    tb.reset(config.initial_input_state)?;
    let default_rx = (PinRoute::Dedicated, RX_PIN);
    for &baud in bauds {
        let link = set_divider(tb, baud)?;
        transmit(tb, &link, SWEEP_TX_BYTE, PinRoute::Dedicated, false)?;
        for i in 0..3 {
            receive_pair(tb, &link, pair_at(bytes, i), default_rx, PinRoute::Dedicated)?;
        }
        report.pass(format!("{baud} baud"));
    }
    Ok(report)
}
