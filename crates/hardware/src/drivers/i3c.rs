//! I3C controller driver.
//!
//! Transfers use the command register one byte at a time: an address phase
//! with START, then a data phase terminated with STOP. A NACK in the address
//! phase ends the transfer early with a STOP. Transfers on a controller whose
//! CTRL.EN bit is clear fail with [`DriverError::Disabled`].

use crate::common::constants::{
    I3C_BASE, I3C_CMD, I3C_CMD_READ, I3C_CMD_START, I3C_CMD_STOP, I3C_CMD_WRITE, I3C_CTRL,
    I3C_CTRL_EN, I3C_DATA, I3C_PRESCALE, I3C_STATUS, I3C_STATUS_NACK, I3C_STATUS_TIP,
};
use crate::drivers::{DriverError, poll_clear};
use crate::env::BusTransactions;

/// Programs the prescaler and enables the controller.
///
/// # Errors
///
/// Returns [`DriverError::Bus`] if a register write fails.
pub fn i3c_init<B: BusTransactions + ?Sized>(bus: &mut B, prescaler: u8) -> Result<(), DriverError> {
    bus.write(I3C_BASE + I3C_PRESCALE, u32::from(prescaler))?;
    bus.write(I3C_BASE + I3C_CTRL, I3C_CTRL_EN)?;
    Ok(())
}

fn ensure_enabled<B: BusTransactions + ?Sized>(bus: &mut B) -> Result<(), DriverError> {
    if bus.read(I3C_BASE + I3C_CTRL)? & I3C_CTRL_EN == 0 {
        return Err(DriverError::Disabled { base: I3C_BASE });
    }
    Ok(())
}

/// Issues `cmd` and waits for it to finish; returns `true` if the target acknowledged.
fn command<B: BusTransactions + ?Sized>(bus: &mut B, cmd: u32) -> Result<bool, DriverError> {
    bus.write(I3C_BASE + I3C_CMD, cmd)?;
    let status = poll_clear(bus, "I3C command", I3C_BASE + I3C_STATUS, I3C_STATUS_TIP)?;
    Ok(status & I3C_STATUS_NACK == 0)
}

/// Writes `data` to the target at 7-bit address `addr`.
///
/// # Returns
///
/// `true` if both the address and the data byte were acknowledged.
///
/// # Errors
///
/// * [`DriverError::Disabled`] if the controller was never enabled.
/// * [`DriverError::PollTimeout`] if a command never completes.
pub fn i3c_write<B: BusTransactions + ?Sized>(
    bus: &mut B,
    addr: u8,
    data: u8,
) -> Result<bool, DriverError> {
    ensure_enabled(bus)?;
    bus.write(I3C_BASE + I3C_DATA, u32::from(addr) << 1)?;
    if !command(bus, I3C_CMD_START | I3C_CMD_WRITE)? {
        let _ = command(bus, I3C_CMD_STOP)?;
        return Ok(false);
    }
    bus.write(I3C_BASE + I3C_DATA, u32::from(data))?;
    command(bus, I3C_CMD_WRITE | I3C_CMD_STOP)
}

/// Reads one byte from the target at 7-bit address `addr`.
///
/// # Returns
///
/// `None` if the address was not acknowledged.
///
/// # Errors
///
/// * [`DriverError::Disabled`] if the controller was never enabled.
/// * [`DriverError::PollTimeout`] if a command never completes.
pub fn i3c_read<B: BusTransactions + ?Sized>(
    bus: &mut B,
    addr: u8,
) -> Result<Option<u8>, DriverError> {
    ensure_enabled(bus)?;
    bus.write(I3C_BASE + I3C_DATA, (u32::from(addr) << 1) | 1)?;
    if !command(bus, I3C_CMD_START | I3C_CMD_WRITE)? {
        let _ = command(bus, I3C_CMD_STOP)?;
        return Ok(None);
    }
    let _ = command(bus, I3C_CMD_READ | I3C_CMD_STOP)?;
    Ok(Some((bus.read(I3C_BASE + I3C_DATA)? & 0xFF) as u8))
}
