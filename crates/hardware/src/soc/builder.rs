//! Caravel chip construction and top-level `System` type.
//!
//! This module builds the simulated chip from configuration. It performs:
//! 1. **Bus setup:** Creates the Wishbone interconnect with the configured latency and decode policy.
//! 2. **Device registration:** Instantiates the SPI masters, the I3C controller and the GPIO block.
//! 3. **Management side:** Adds the pad bank and the management core that powers the user project.
//! 4. **Clocking:** Ticks the management core, propagates power and pad levels, then ticks the bus.

use tracing::debug;

use crate::common::constants::{GPIO_BASE, GPIO_PADS, I3C_BASE, SPI_BASES};
use crate::common::error::BusError;
use crate::config::Config;
use crate::soc::devices::{Gpio, I3c, Spi};
use crate::soc::interconnect::Bus;
use crate::soc::management::ManagementCore;
use crate::soc::pads::PadBank;

/// The simulated chip: user-project bus, pads and management core.
#[derive(Debug)]
pub struct System {
    /// User-project Wishbone interconnect and its peripherals.
    pub bus: Bus,
    /// Caravel I/O pads.
    pub pads: PadBank,
    /// Management core running the test firmware.
    pub mgmt: ManagementCore,
    in_reset: bool,
    cycle: u64,
}

impl System {
    /// Builds the chip at the fixed user-project memory map, held in reset.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Overlap`] if two peripheral windows intersect.
    pub fn new(config: &Config) -> Result<Self, BusError> {
        let mut bus = Bus::new(config.bus.ack_latency, config.bus.strict_decode);

        for (index, &base) in SPI_BASES.iter().enumerate() {
            bus.add_device(Box::new(Spi::new(
                index as u32,
                base,
                config.peripherals.spi_fifo_depth,
                config.peripherals.spi_loopback,
            )))?;
        }
        bus.add_device(Box::new(I3c::new(I3C_BASE)))?;
        bus.add_device(Box::new(Gpio::new(
            GPIO_BASE,
            config.peripherals.gpio_pins,
        )))?;

        debug!(devices = ?bus.device_names(), "user project assembled");

        Ok(Self {
            bus,
            pads: PadBank::new(),
            mgmt: ManagementCore::new(config.env.firmware_boot_cycles),
            in_reset: true,
            cycle: 0,
        })
    }

    /// Asserts or releases chip reset.
    pub fn set_reset(&mut self, asserted: bool) {
        if asserted {
            self.mgmt.hold_reset();
            self.pads.reset();
            self.bus.set_powered(false);
        } else {
            self.mgmt.release_reset();
        }
        self.in_reset = asserted;
    }

    /// Returns whether chip reset is asserted.
    pub fn in_reset(&self) -> bool {
        self.in_reset
    }

    /// Clock cycles elapsed since construction.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Whether the firmware has raised its ready signal.
    pub fn firmware_ready(&self) -> bool {
        self.mgmt.mgmt_gpio()
    }

    /// Advances the chip by one clock.
    ///
    /// # Returns
    ///
    /// The termination of the outstanding Wishbone transaction, if it ends this cycle.
    pub fn tick(&mut self) -> Option<Result<u32, BusError>> {
        self.cycle += 1;
        if self.in_reset {
            return None;
        }

        self.mgmt.tick(&mut self.pads);
        let power = self.mgmt.user_power();
        if power != self.bus.is_powered() {
            debug!(power, cycle = self.cycle, "user project power changed");
            self.bus.set_powered(power);
        }

        let mut levels = 0;
        for (pin, &pad) in GPIO_PADS.iter().enumerate() {
            if self.pads.sensed_level(pad) {
                levels |= 1 << pin;
            }
        }
        if let Some(gpio) = self.bus.gpio_mut() {
            gpio.set_pad_inputs(levels);
        }

        self.bus.tick()
    }
}
