//! General-purpose I/O block.
//!
//! # Registers
//!
//! * `0x00`: DATAI (read-only; pad level for inputs, driven level for outputs)
//! * `0x04`: DATAO (output latch)
//! * `0x08`: DIR (1 = output)
//! * `0xFF00`..`0xFF0C`: IM, MIS, RIS, IC (bit `n`: rising edge on pin `n`)
//!
//! All registers are masked to the configured pin count.

use crate::common::constants::{GPIO_DATAI, GPIO_DATAO, GPIO_DIR, GPIO_IRQ_LINE, GPIO_WINDOW};
use crate::soc::devices::{Device, IrqBlock};

/// GPIO device.
#[derive(Debug)]
pub struct Gpio {
    base_addr: u32,
    pins: u32,
    mask: u32,
    data_out: u32,
    dir: u32,
    pad_in: u32,
    /// DATAI as sampled on the previous clock.
    last_level: u32,
    irq: IrqBlock,
}

impl Gpio {
    /// Creates a GPIO block with `pins` pins (1..=32) at `base_addr`.
    pub fn new(base_addr: u32, pins: u32) -> Self {
        let pins = pins.clamp(1, 32);
        let mask = if pins == 32 { u32::MAX } else { (1 << pins) - 1 };
        Self {
            base_addr,
            pins,
            mask,
            data_out: 0,
            dir: 0,
            pad_in: 0,
            last_level: 0,
            irq: IrqBlock::new(mask),
        }
    }

    /// Number of pins.
    pub fn pins(&self) -> u32 {
        self.pins
    }

    /// Drives the external side of the pads; bit `n` is pin `n`.
    pub fn set_pad_inputs(&mut self, levels: u32) {
        self.pad_in = levels & self.mask;
    }

    /// Returns `(levels, output_enables)` as driven by the block.
    pub fn pad_outputs(&self) -> (u32, u32) {
        (self.data_out & self.dir, self.dir)
    }

    fn data_in(&self) -> u32 {
        ((self.pad_in & !self.dir) | (self.data_out & self.dir)) & self.mask
    }
}

impl Device for Gpio {
    fn name(&self) -> &str {
        "GPIO"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, GPIO_WINDOW)
    }

    fn read_u32(&mut self, offset: u32) -> u32 {
        if let Some(value) = self.irq.read(offset) {
            return value;
        }
        match offset {
            GPIO_DATAI => self.data_in(),
            GPIO_DATAO => self.data_out,
            GPIO_DIR => self.dir,
            _ => 0,
        }
    }

    fn write_u32(&mut self, offset: u32, val: u32) {
        if self.irq.write(offset, val) {
            return;
        }
        match offset {
            GPIO_DATAO => self.data_out = val & self.mask,
            GPIO_DIR => self.dir = val & self.mask,
            _ => {}
        }
    }

    fn reset(&mut self) {
        self.data_out = 0;
        self.dir = 0;
        self.last_level = self.data_in();
        self.irq.reset();
    }

    fn tick(&mut self) -> bool {
        let level = self.data_in();
        self.irq.raise(level & !self.last_level);
        self.last_level = level;
        self.irq.pending()
    }

    fn irq_id(&self) -> Option<u32> {
        Some(GPIO_IRQ_LINE)
    }

    fn has_irq_block(&self) -> bool {
        true
    }

    fn as_gpio_mut(&mut self) -> Option<&mut Gpio> {
        Some(self)
    }
}
