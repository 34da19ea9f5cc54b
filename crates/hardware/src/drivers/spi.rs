//! SPI master driver.

use crate::common::constants::{
    SPI_CFG, SPI_CTRL, SPI_CTRL_BSY, SPI_CTRL_GO, SPI_PR, SPI_RXDATA, SPI_TXDATA,
};
use crate::drivers::{DriverError, poll_clear};
use crate::env::BusTransactions;

/// Programs the prescaler and CPOL/CPHA configuration of the SPI master at `base`.
///
/// # Errors
///
/// Returns [`DriverError::Bus`] if a register write fails.
pub fn spi_init<B: BusTransactions + ?Sized>(
    bus: &mut B,
    base: u32,
    prescaler: u8,
    config: u8,
) -> Result<(), DriverError> {
    bus.write(base + SPI_PR, u32::from(prescaler))?;
    bus.write(base + SPI_CFG, u32::from(config))?;
    Ok(())
}

/// Shifts `data` out and waits for the transfer to finish.
///
/// The byte received in exchange stays in the RX FIFO.
///
/// # Errors
///
/// Returns [`DriverError::PollTimeout`] if BSY never clears.
pub fn spi_write<B: BusTransactions + ?Sized>(
    bus: &mut B,
    base: u32,
    data: u8,
) -> Result<(), DriverError> {
    bus.write(base + SPI_TXDATA, u32::from(data))?;
    bus.write(base + SPI_CTRL, SPI_CTRL_GO)?;
    let _ = poll_clear(bus, "SPI transfer", base + SPI_CTRL, SPI_CTRL_BSY)?;
    Ok(())
}

/// Pops one received byte from the RX FIFO.
///
/// # Errors
///
/// Returns [`DriverError::Bus`] if the read fails.
pub fn spi_read<B: BusTransactions + ?Sized>(bus: &mut B, base: u32) -> Result<u8, DriverError> {
    Ok((bus.read(base + SPI_RXDATA)? & 0xFF) as u8)
}

/// Full-duplex exchange of one byte.
///
/// # Errors
///
/// Returns [`DriverError::PollTimeout`] if BSY never clears.
pub fn spi_transfer<B: BusTransactions + ?Sized>(
    bus: &mut B,
    base: u32,
    data: u8,
) -> Result<u8, DriverError> {
    spi_write(bus, base, data)?;
    spi_read(bus, base)
}
