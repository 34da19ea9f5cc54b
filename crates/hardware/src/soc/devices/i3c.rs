//! I3C controller.
//!
//! A command-driven controller in the style of the OpenCores I2C master: software
//! stages a byte in DATA and issues START/WRITE/READ/STOP through CMD, then polls
//! STATUS.TIP. No target is modelled on the bus, so SDA floats high: reads return
//! `0xFF` and writes are not acknowledged.
//!
//! # Registers
//!
//! * `0x00`: PRESCALE (16-bit clock prescaler)
//! * `0x04`: CTRL (bit 0 EN, bit 1 IEN)
//! * `0x08`: DATA (write stages TX byte, read returns last RX byte)
//! * `0x0C`: CMD (bit 0 START, bit 1 STOP, bit 2 READ, bit 3 WRITE)
//! * `0x10`: STATUS (bit 0 TIP, bit 1 IF, bit 2 NACK)
//! * `0xFF00`..`0xFF0C`: IM, MIS, RIS, IC (bit 0 command complete, bit 1 NACK)
//!
//! The IRQ line is asserted while CTRL.IEN is set and MIS is non-zero.

use crate::common::constants::{
    I3C_CMD, I3C_CMD_READ, I3C_CMD_WRITE, I3C_CTRL, I3C_CTRL_EN, I3C_CTRL_IEN, I3C_DATA,
    I3C_IRQ_DONE, I3C_IRQ_LINE, I3C_IRQ_NACK, I3C_PRESCALE, I3C_STATUS, I3C_STATUS_IF,
    I3C_STATUS_NACK, I3C_STATUS_TIP, I3C_WINDOW,
};
use crate::soc::devices::{Device, IrqBlock};

/// Writable bits of PRESCALE.
const PRESCALE_MASK: u32 = 0xFFFF;
/// Writable bits of CTRL.
const CTRL_MASK: u32 = I3C_CTRL_EN | I3C_CTRL_IEN;
/// Bus clocks per command: eight data bits plus the acknowledge slot.
const CLOCKS_PER_COMMAND: u64 = 9;

/// Command currently on the bus.
#[derive(Debug, Clone, Copy)]
struct Command {
    bits: u32,
    remaining: u64,
}

/// I3C controller device.
#[derive(Debug)]
pub struct I3c {
    base_addr: u32,
    prescale: u32,
    ctrl: u32,
    tx_data: u8,
    rx_data: u8,
    nack: bool,
    irq_flag: bool,
    irq: IrqBlock,
    command: Option<Command>,
}

impl I3c {
    /// Creates the controller at `base_addr`.
    pub fn new(base_addr: u32) -> Self {
        Self {
            base_addr,
            prescale: 0,
            ctrl: 0,
            tx_data: 0,
            rx_data: 0,
            nack: false,
            irq_flag: false,
            irq: IrqBlock::new(I3C_IRQ_DONE | I3C_IRQ_NACK),
            command: None,
        }
    }

    /// Returns `true` while a command is executing.
    pub fn is_busy(&self) -> bool {
        self.command.is_some()
    }

    /// Current prescaler value.
    pub fn prescale(&self) -> u32 {
        self.prescale
    }

    /// Byte most recently staged for transmission.
    pub fn tx_data(&self) -> u8 {
        self.tx_data
    }

    /// Whether the controller accepts commands.
    pub const fn enabled(&self) -> bool {
        self.ctrl & I3C_CTRL_EN != 0
    }

    fn status(&mut self) -> u32 {
        let mut status = 0;
        if self.is_busy() {
            status |= I3C_STATUS_TIP;
        }
        if self.irq_flag {
            status |= I3C_STATUS_IF;
        }
        if self.nack {
            status |= I3C_STATUS_NACK;
        }
        self.irq_flag = false;
        status
    }

    fn issue(&mut self, bits: u32) {
        if !self.enabled() || self.is_busy() || bits == 0 {
            return;
        }
        self.nack = false;
        self.command = Some(Command {
            bits,
            remaining: CLOCKS_PER_COMMAND * (u64::from(self.prescale) + 1),
        });
    }

    fn complete(&mut self, bits: u32) {
        if bits & I3C_CMD_READ != 0 {
            self.rx_data = 0xFF;
        }
        if bits & I3C_CMD_WRITE != 0 {
            self.nack = true;
            self.irq.raise(I3C_IRQ_NACK);
        }
        self.irq_flag = true;
        self.irq.raise(I3C_IRQ_DONE);
    }
}

impl Device for I3c {
    fn name(&self) -> &str {
        "I3C"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, I3C_WINDOW)
    }

    fn read_u32(&mut self, offset: u32) -> u32 {
        if let Some(value) = self.irq.read(offset) {
            return value;
        }
        match offset {
            I3C_PRESCALE => self.prescale,
            I3C_CTRL => self.ctrl,
            I3C_DATA => u32::from(self.rx_data),
            I3C_STATUS => self.status(),
            _ => 0,
        }
    }

    fn write_u32(&mut self, offset: u32, val: u32) {
        if self.irq.write(offset, val) {
            return;
        }
        match offset {
            I3C_PRESCALE => self.prescale = val & PRESCALE_MASK,
            I3C_CTRL => self.ctrl = val & CTRL_MASK,
            I3C_DATA => self.tx_data = val as u8,
            I3C_CMD => self.issue(val & 0xF),
            _ => {}
        }
    }

    fn reset(&mut self) {
        *self = Self::new(self.base_addr);
    }

    fn tick(&mut self) -> bool {
        if let Some(cmd) = self.command.as_mut() {
            cmd.remaining = cmd.remaining.saturating_sub(1);
            if cmd.remaining == 0 {
                let bits = cmd.bits;
                self.command = None;
                self.complete(bits);
            }
        }
        self.ctrl & I3C_CTRL_IEN != 0 && self.irq.pending()
    }

    fn irq_id(&self) -> Option<u32> {
        Some(I3C_IRQ_LINE)
    }

    fn has_irq_block(&self) -> bool {
        true
    }

    fn as_i3c_mut(&mut self) -> Option<&mut I3c> {
        Some(self)
    }
}
