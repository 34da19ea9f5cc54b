//! Test environment: bus-transaction providers and the Caravel configurator.
//!
//! The verifier and the firmware drivers only ever see [`BusTransactions`];
//! [`CaravelEnv`] is the provider backed by the simulated chip.

use thiserror::Error;

use crate::common::error::{BusError, ConfigError};

/// Caravel environment configurator and bus master.
pub mod caravel;

pub use caravel::CaravelEnv;

/// Blocking Wishbone master interface.
///
/// Each call returns only once the transaction has been acknowledged (or has
/// failed). Calls never overlap: the `&mut self` receiver serializes them.
pub trait BusTransactions {
    /// Writes `value` to `addr` and waits for the acknowledge.
    ///
    /// # Errors
    ///
    /// Returns the [`BusError`] that terminated the transaction.
    fn write(&mut self, addr: u32, value: u32) -> Result<(), BusError>;

    /// Reads `addr` and waits for the data.
    ///
    /// # Errors
    ///
    /// Returns the [`BusError`] that terminated the transaction.
    fn read(&mut self, addr: u32) -> Result<u32, BusError>;
}

impl<T: BusTransactions + ?Sized> BusTransactions for &mut T {
    fn write(&mut self, addr: u32, value: u32) -> Result<(), BusError> {
        (**self).write(addr, value)
    }

    fn read(&mut self, addr: u32) -> Result<u32, BusError> {
        (**self).read(addr)
    }
}

/// Failure to bring up the environment.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The chip could not be assembled.
    #[error("cannot build user project: {0}")]
    Bus(#[from] BusError),

    /// The firmware never raised the management GPIO.
    #[error("firmware not ready after {cycles} cycles")]
    FirmwareTimeout {
        /// Cycles waited after reset release.
        cycles: u64,
    },
}
