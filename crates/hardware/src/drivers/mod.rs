//! Firmware-style peripheral drivers.
//!
//! These mirror the user-project firmware API and run over any
//! [`BusTransactions`](crate::env::BusTransactions) provider, so the same
//! register sequences can be exercised from a test or from the CLI.
//!
//! Every busy-wait is bounded by [`MAX_POLLS`].

use thiserror::Error;

use crate::common::error::BusError;

/// GPIO driver.
pub mod gpio;
/// I3C driver.
pub mod i3c;
/// SPI driver.
pub mod spi;

/// Maximum status reads before a busy-wait is abandoned.
pub const MAX_POLLS: u32 = 100_000;

/// Driver failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// A bus transaction failed.
    #[error(transparent)]
    Bus(#[from] BusError),

    /// A busy flag never cleared.
    #[error("{what} still busy after {polls} polls of {addr:#010x}")]
    PollTimeout {
        /// What was being waited for.
        what: &'static str,
        /// Register polled.
        addr: u32,
        /// Polls issued.
        polls: u32,
    },

    /// A transfer was requested while the controller's enable bit is clear.
    #[error("controller at {base:#010x} is not enabled")]
    Disabled {
        /// Base address of the controller.
        base: u32,
    },

    /// The pin number does not exist on a 32-bit port.
    #[error("invalid GPIO pin {pin}")]
    InvalidPin {
        /// Offending pin.
        pin: u8,
    },
}

/// Reads `addr` until `(value & mask) == 0`, returning the final value.
pub(crate) fn poll_clear<B: crate::env::BusTransactions + ?Sized>(
    bus: &mut B,
    what: &'static str,
    addr: u32,
    mask: u32,
) -> Result<u32, DriverError> {
    for _ in 0..MAX_POLLS {
        let value = bus.read(addr)?;
        if value & mask == 0 {
            return Ok(value);
        }
    }
    Err(DriverError::PollTimeout {
        what,
        addr,
        polls: MAX_POLLS,
    })
}
