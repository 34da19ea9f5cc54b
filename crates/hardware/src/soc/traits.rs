//! Device trait for Wishbone-attached peripherals.
//!
//! This module defines the `Device` trait implemented by every user-project slave. It provides:
//! 1. **Identification:** `name` and `address_range` for address decode.
//! 2. **Access:** 32-bit word read/write at window-relative offsets.
//! 3. **Lifecycle:** `tick` once per clock, `reset` on power-up, an optional IRQ line and interrupt block.
//! 4. **Downcasting:** Optional casts to `Spi`, `I3c` or `Gpio` for testbench-side wiring.
//!
//! All implementors must be `Send + Sync` so a configured environment can move between threads.

use crate::soc::devices::{Gpio, I3c, Spi};

/// Trait for memory-mapped peripherals attached to the user-project Wishbone bus.
pub trait Device: Send + Sync {
    /// Returns a short name for this device (e.g., `"SPI0"`, `"GPIO"`).
    fn name(&self) -> &str;
    /// Returns (base_address, size_in_bytes) of this device's register window.
    fn address_range(&self) -> (u32, u32);
    /// Reads the 32-bit register at the given window-relative offset.
    ///
    /// Reads may have side effects (FIFO pops, clear-on-read flags).
    fn read_u32(&mut self, offset: u32) -> u32;
    /// Writes the 32-bit register at the given window-relative offset.
    fn write_u32(&mut self, offset: u32, val: u32);
    /// Returns every register to its power-on value.
    fn reset(&mut self);

    /// Advances device state by one clock; returns `true` while the interrupt line is asserted.
    fn tick(&mut self) -> bool {
        false
    }
    /// Returns the user IRQ line this device drives, if any.
    fn irq_id(&self) -> Option<u32> {
        None
    }
    /// Returns `true` if the device also decodes the interrupt block at
    /// `base + IRQ_BLOCK_OFFSET`; accesses there arrive with their full offset.
    fn has_irq_block(&self) -> bool {
        false
    }

    /// Returns a mutable reference as `Spi` if this device is an SPI master; otherwise `None`.
    fn as_spi_mut(&mut self) -> Option<&mut Spi> {
        None
    }
    /// Returns a mutable reference as `I3c` if this device is the I3C controller; otherwise `None`.
    fn as_i3c_mut(&mut self) -> Option<&mut I3c> {
        None
    }
    /// Returns a mutable reference as `Gpio` if this device is the GPIO block; otherwise `None`.
    fn as_gpio_mut(&mut self) -> Option<&mut Gpio> {
        None
    }
}
