//! UART peripheral with hardware flow control.
//!
//! Behavioral model of a small UART peripheral. Handles the data, status,
//! divider and RX-select registers, shifts frames out on the TX pins and in
//! from the selected RX pin one clock at a time, and asserts RTS when its
//! receive FIFO cannot take another byte.
//!
//! # Pins
//!
//! * `uo_out[0,2,4,6]`: TX (idle high)
//! * `uo_out[1,3,5,7]`: RTS (active low: 0 means ready)
//! * `ui_in[7]` or `ui_in[3]`: RX, per the RX-select register

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::common::constants::uart_regs::{
    DATA, DIVIDER, RX_ALT_PIN, RX_PIN, RX_SELECT, STATUS, STATUS_RX_VALID, STATUS_TX_BUSY,
};
use crate::common::constants::{UART_DATA_BITS, UART_FRAME_BITS, UART_RX_FIFO_DEPTH};
use crate::soc::traits::Peripheral;

/// Output pins carrying TX.
const TX_PINS: u8 = 0x55;

/// Output pins carrying RTS.
const RTS_PINS: u8 = 0xAA;

/// Transmit shift register.
#[derive(Clone, Copy, Debug, Default)]
struct Transmitter {
    /// Remaining frame bits, LSB on the line.
    shift: u16,
    /// Bits left in the frame, including the one on the line.
    bits_left: usize,
    /// Cycles left in the current bit.
    countdown: u32,
}

impl Transmitter {
    const fn busy(&self) -> bool {
        self.bits_left > 0
    }

    const fn line(&self) -> bool {
        !self.busy() || self.shift & 1 != 0
    }
}

/// Receive state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Receiver {
    /// Waiting for a falling edge.
    #[default]
    Idle,
    /// Mid-frame. `bit` 0 is the start bit, 1..=8 data, 9 stop.
    Receiving {
        bit: usize,
        countdown: u32,
        shift: u8,
    },
}

/// UART peripheral model.
#[derive(Debug)]
pub struct UartPeripheral {
    /// Divider loaded at reset.
    reset_divider: u32,
    /// Clock cycles per bit.
    divider: u32,
    /// Routes RX from the alternative pin when set.
    rx_alt: bool,
    /// Frame currently being shifted out.
    tx: Transmitter,
    /// Byte waiting for the transmitter.
    tx_holding: Option<u8>,
    /// Frame currently being shifted in.
    rx: Receiver,
    /// Received bytes not yet read.
    rx_fifo: VecDeque<u8>,
}

impl UartPeripheral {
    /// Creates a UART whose divider resets to `reset_divider` cycles per bit.
    pub fn new(reset_divider: u32) -> Self {
        let reset_divider = reset_divider.max(1);
        Self {
            reset_divider,
            divider: reset_divider,
            rx_alt: false,
            tx: Transmitter::default(),
            tx_holding: None,
            rx: Receiver::Idle,
            rx_fifo: VecDeque::with_capacity(UART_RX_FIFO_DEPTH),
        }
    }

    /// Current divider.
    pub const fn divider(&self) -> u32 {
        self.divider
    }

    /// Received bytes waiting to be read.
    pub fn pending(&self) -> usize {
        self.rx_fifo.len()
    }

    /// Request-to-send level: high once the FIFO cannot take another frame.
    ///
    /// A single unread byte only deasserts readiness while a second frame is
    /// arriving; two unread bytes deassert it outright.
    pub fn rts(&self) -> bool {
        let pending = self.rx_fifo.len();
        pending >= UART_RX_FIFO_DEPTH || (pending + 1 >= UART_RX_FIFO_DEPTH && self.rx != Receiver::Idle)
    }

    fn start_frame(&mut self, byte: u8) {
        // start (0), data LSB first, stop (1)
        self.tx = Transmitter {
            shift: (1 << (UART_DATA_BITS + 1)) | (u16::from(byte) << 1),
            bits_left: UART_FRAME_BITS,
            countdown: self.divider,
        };
    }

    fn write_data(&mut self, byte: u8) {
        if self.tx.busy() {
            if self.tx_holding.replace(byte).is_some() {
                warn!("UART TX holding register overwritten");
            }
        } else {
            self.start_frame(byte);
        }
    }

    fn read_data(&mut self) -> u8 {
        self.rx_fifo.pop_front().unwrap_or(0)
    }

    fn read_status(&self) -> u8 {
        let mut status = 0;
        if self.tx.busy() || self.tx_holding.is_some() {
            status |= STATUS_TX_BUSY;
        }
        if !self.rx_fifo.is_empty() {
            status |= STATUS_RX_VALID;
        }
        status
    }

    fn tick_tx(&mut self) {
        if !self.tx.busy() {
            return;
        }
        self.tx.countdown -= 1;
        if self.tx.countdown == 0 {
            self.tx.shift >>= 1;
            self.tx.bits_left -= 1;
            self.tx.countdown = self.divider;
            if !self.tx.busy() {
                if let Some(byte) = self.tx_holding.take() {
                    self.start_frame(byte);
                }
            }
        }
    }

    fn tick_rx(&mut self, line: bool) {
        self.rx = match self.rx {
            Receiver::Idle if !line => Receiver::Receiving {
                bit: 0,
                countdown: (self.divider / 2).max(1),
                shift: 0,
            },
            Receiver::Idle => Receiver::Idle,
            Receiver::Receiving {
                bit,
                countdown,
                shift,
            } if countdown > 1 => Receiver::Receiving {
                bit,
                countdown: countdown - 1,
                shift,
            },
            Receiver::Receiving { bit, shift, .. } => self.sample_rx(bit, shift, line),
        };
    }

    fn sample_rx(&mut self, bit: usize, shift: u8, line: bool) -> Receiver {
        match bit {
            // A start bit that is high again mid-bit was a glitch.
            0 if line => Receiver::Idle,
            1..=UART_DATA_BITS => Receiver::Receiving {
                bit: bit + 1,
                countdown: self.divider,
                shift: shift | (u8::from(line) << (bit - 1)),
            },
            0 => Receiver::Receiving {
                bit: 1,
                countdown: self.divider,
                shift,
            },
            _ => {
                if !line {
                    warn!("UART RX framing error, byte {shift:#04x} dropped");
                } else if self.rx_fifo.len() < UART_RX_FIFO_DEPTH {
                    debug!("UART RX {shift:#04x}");
                    self.rx_fifo.push_back(shift);
                } else {
                    warn!("UART RX overrun, byte {shift:#04x} dropped");
                }
                Receiver::Idle
            }
        }
    }
}

impl Peripheral for UartPeripheral {
    fn name(&self) -> &str {
        "UART"
    }

    fn read_u32(&mut self, offset: u32) -> u32 {
        match offset {
            DIVIDER => self.divider,
            _ => u32::from(self.read_u8(offset)),
        }
    }

    fn write_u32(&mut self, offset: u32, val: u32) {
        match offset {
            DIVIDER => self.divider = val.max(1),
            _ => self.write_u8(offset, val as u8),
        }
    }

    fn read_u8(&mut self, offset: u32) -> u8 {
        match offset {
            DATA => self.read_data(),
            STATUS => self.read_status(),
            DIVIDER => self.divider as u8,
            RX_SELECT => u8::from(self.rx_alt),
            _ => 0,
        }
    }

    fn write_u8(&mut self, offset: u32, val: u8) {
        match offset {
            DATA => self.write_data(val),
            DIVIDER => self.divider = (self.divider & !0xFF) | u32::from(val).max(1),
            RX_SELECT => self.rx_alt = val & 1 != 0,
            _ => {}
        }
    }

    fn reset(&mut self) {
        *self = Self::new(self.reset_divider);
    }

    fn tick(&mut self, ui_in: u8) -> u8 {
        let pin = if self.rx_alt { RX_ALT_PIN } else { RX_PIN };
        self.tick_rx((ui_in >> pin) & 1 != 0);
        self.tick_tx();

        let mut uo_out = 0;
        if self.tx.line() {
            uo_out |= TX_PINS;
        }
        if self.rts() {
            uo_out |= RTS_PINS;
        }
        uo_out
    }
}
