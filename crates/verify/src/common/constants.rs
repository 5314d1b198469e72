//! Constants shared by the link models, the driver, and the reference devices.

/// Data bits per serial frame.
pub const UART_DATA_BITS: usize = 8;

/// Bit periods in a frame: start, eight data bits, stop.
pub const UART_FRAME_BITS: usize = 1 + UART_DATA_BITS + 1;

/// Baud rate a UART peripheral comes out of reset with.
pub const UART_RESET_BAUD: u32 = 115_200;

/// Receive FIFO depth of the UART peripheral.
pub const UART_RX_FIFO_DEPTH: usize = 2;

/// Peripheral address window (6-bit byte address).
pub const PERIPHERAL_WINDOW: u32 = 0x40;

/// Number of floating-point registers in the shader unit.
pub const SHADER_REGISTERS: usize = 4;

/// Maximum instruction-memory slots any shader profile exposes.
pub const SHADER_MAX_SLOTS: usize = 8;

/// Size of one register or instruction word in bytes.
pub const WORD_BYTES: u32 = 4;

/// Status register: program is executing.
pub const STATUS_RUNNING: u32 = 1 << 0;

/// Status register: execution reached a halt instruction.
pub const STATUS_HALTED: u32 = 1 << 1;

/// Control register: start execution.
pub const CONTROL_START: u32 = 1 << 0;

/// Control register: reset the program counter before anything else.
pub const CONTROL_RESET_PC: u32 = 1 << 1;

/// UART peripheral register offsets.
pub mod uart_regs {
    /// Transmit (write) / receive (read) data byte.
    pub const DATA: u32 = 0x00;
    /// Status: bit 0 transmitter busy, bit 1 receive data available.
    pub const STATUS: u32 = 0x04;
    /// Divider word: source clock cycles per bit.
    pub const DIVIDER: u32 = 0x08;
    /// RX pin select: 0 routes `ui_in[7]`, 1 routes `ui_in[3]`.
    pub const RX_SELECT: u32 = 0x0C;

    /// Status bit: a frame is being shifted out.
    pub const STATUS_TX_BUSY: u8 = 1 << 0;
    /// Status bit: at least one received byte is waiting.
    pub const STATUS_RX_VALID: u8 = 1 << 1;

    /// Default receive input pin.
    pub const RX_PIN: u8 = 7;
    /// Alternative receive input pin.
    pub const RX_ALT_PIN: u8 = 3;
}

/// Default register address maps for the shader peripheral variants.
pub mod shader_regs {
    /// Combinational variant: operand A.
    pub const COMB_A: u32 = 0x00;
    /// Combinational variant: operand B.
    pub const COMB_B: u32 = 0x04;
    /// Combinational variant: `A + B` (read-only).
    pub const COMB_ADD: u32 = 0x08;
    /// Combinational variant: `A * B` (read-only).
    pub const COMB_MUL: u32 = 0x0C;

    /// Programmable variant: first of four float registers.
    pub const PROG_REGS: u32 = 0x00;
    /// Programmable variant: status register.
    pub const PROG_STATUS: u32 = 0x10;
    /// Programmable variant: instruction memory base.
    pub const PROG_IMEM: u32 = 0x20;
    /// Programmable variant: control register.
    pub const PROG_CONTROL: u32 = 0x3C;

    /// Minimal variant: data register.
    pub const MIN_DATA: u32 = 0x00;
    /// Minimal variant: data plus one (read-only).
    pub const MIN_INCREMENTED: u32 = 0x04;
}
