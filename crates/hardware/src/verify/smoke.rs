//! Firmware smoke test.
//!
//! Brings up every peripheral through the drivers, shifts one byte through
//! SPI0 (MOSI looped back to MISO on the testbench) and checks the I3C
//! prescaler read-back.

use tracing::info;

use crate::common::constants::{GPIO_DIR_INPUT, GPIO_DIR_OUTPUT, I3C_BASE, I3C_PRESCALE, SPI0_BASE};
use crate::drivers::gpio::{gpio_init, gpio_set_direction, gpio_write};
use crate::drivers::i3c::i3c_init;
use crate::drivers::spi::{spi_init, spi_transfer};
use crate::env::BusTransactions;
use crate::verify::{CheckError, Expect, Verifier, verify_value};

const SPI_PATTERN: u8 = 0xA5;
const PRESCALER: u8 = 0x10;

/// Runs the smoke test.
///
/// # Errors
///
/// * [`CheckError::Mismatch`] if the loopback byte or the I3C prescaler differ.
/// * [`CheckError::Driver`] if a driver poll times out.
pub fn smoke_test<B: BusTransactions + ?Sized>(bus: &mut B) -> Result<(), CheckError> {
    spi_init(bus, SPI0_BASE, PRESCALER, 0x00)?;
    i3c_init(bus, PRESCALER)?;
    gpio_init(bus)?;

    gpio_set_direction(bus, 0, GPIO_DIR_OUTPUT)?;
    gpio_set_direction(bus, 1, GPIO_DIR_INPUT)?;

    info!("SPI0 loopback transfer of {SPI_PATTERN:#04x}");
    let received = spi_transfer(bus, SPI0_BASE, SPI_PATTERN)?;

    gpio_write(bus, 0, 1)?;

    let mut v = Verifier::new(bus);
    v.write(I3C_BASE + I3C_PRESCALE, u32::from(PRESCALER))?;
    let prescale = v.read(I3C_BASE + I3C_PRESCALE)?;

    verify_value("SPI0 loopback", u32::from(received), Expect::exact(u32::from(SPI_PATTERN)))?;
    verify_value("I3C prescaler", prescale, Expect::exact(u32::from(PRESCALER)))?;

    info!("Smoke test PASSED");
    Ok(())
}
