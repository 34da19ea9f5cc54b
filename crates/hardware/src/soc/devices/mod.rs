//! Memory-Mapped Peripherals.
//!
//! This module contains the register-level models of the user-project
//! peripherals: four SPI masters, an I3C controller and a GPIO block.

/// General-purpose I/O block.
pub mod gpio;

/// I3C controller.
pub mod i3c;

/// Shared interrupt mask/status block.
pub mod irq;

/// SPI master with RX/TX FIFOs.
pub mod spi;

pub use gpio::Gpio;
pub use i3c::I3c;
pub use irq::IrqBlock;
pub use spi::Spi;

pub use crate::soc::traits::Device;
