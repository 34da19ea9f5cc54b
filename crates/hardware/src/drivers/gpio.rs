//! GPIO driver. Direction, output and interrupt-mask updates are read-modify-write.

use crate::common::constants::{
    GPIO_BASE, GPIO_DATAI, GPIO_DATAO, GPIO_DIR, GPIO_DIR_OUTPUT, IRQ_IC, IRQ_IM,
};
use crate::drivers::DriverError;
use crate::env::BusTransactions;

fn pin_mask(pin: u8) -> Result<u32, DriverError> {
    1u32.checked_shl(u32::from(pin))
        .ok_or(DriverError::InvalidPin { pin })
}

/// Clears every pending GPIO interrupt.
///
/// # Errors
///
/// Returns [`DriverError::Bus`] if the register write fails.
pub fn gpio_init<B: BusTransactions + ?Sized>(bus: &mut B) -> Result<(), DriverError> {
    bus.write(GPIO_BASE + IRQ_IC, 0xFF)?;
    Ok(())
}

/// Sets `pin` to output when `dir` is [`GPIO_DIR_OUTPUT`], input otherwise.
///
/// # Errors
///
/// Returns [`DriverError::InvalidPin`] for pins above 31.
pub fn gpio_set_direction<B: BusTransactions + ?Sized>(
    bus: &mut B,
    pin: u8,
    dir: u8,
) -> Result<(), DriverError> {
    let mask = pin_mask(pin)?;
    let mut reg = bus.read(GPIO_BASE + GPIO_DIR)?;
    if dir == GPIO_DIR_OUTPUT {
        reg |= mask;
    } else {
        reg &= !mask;
    }
    bus.write(GPIO_BASE + GPIO_DIR, reg)?;
    Ok(())
}

/// Drives `pin` high for a non-zero `value`, low otherwise.
///
/// # Errors
///
/// Returns [`DriverError::InvalidPin`] for pins above 31.
pub fn gpio_write<B: BusTransactions + ?Sized>(
    bus: &mut B,
    pin: u8,
    value: u8,
) -> Result<(), DriverError> {
    let mask = pin_mask(pin)?;
    let mut reg = bus.read(GPIO_BASE + GPIO_DATAO)?;
    if value != 0 {
        reg |= mask;
    } else {
        reg &= !mask;
    }
    bus.write(GPIO_BASE + GPIO_DATAO, reg)?;
    Ok(())
}

/// Level of `pin` (0 or 1).
///
/// # Errors
///
/// Returns [`DriverError::InvalidPin`] for pins above 31.
pub fn gpio_read<B: BusTransactions + ?Sized>(bus: &mut B, pin: u8) -> Result<u8, DriverError> {
    let _ = pin_mask(pin)?;
    Ok(((bus.read(GPIO_BASE + GPIO_DATAI)? >> pin) & 1) as u8)
}

/// Unmasks the edge interrupt of `pin`.
///
/// # Errors
///
/// Returns [`DriverError::InvalidPin`] for pins above 31.
pub fn gpio_enable_interrupt<B: BusTransactions + ?Sized>(
    bus: &mut B,
    pin: u8,
) -> Result<(), DriverError> {
    let mask = pin_mask(pin)?;
    let reg = bus.read(GPIO_BASE + IRQ_IM)?;
    bus.write(GPIO_BASE + IRQ_IM, reg | mask)?;
    Ok(())
}

/// Clears the latched interrupt of `pin`.
///
/// # Errors
///
/// Returns [`DriverError::InvalidPin`] for pins above 31.
pub fn gpio_clear_interrupt<B: BusTransactions + ?Sized>(
    bus: &mut B,
    pin: u8,
) -> Result<(), DriverError> {
    let mask = pin_mask(pin)?;
    bus.write(GPIO_BASE + IRQ_IC, mask)?;
    Ok(())
}
