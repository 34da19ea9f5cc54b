//! User-project register access test.
//!
//! A fixed, ordered list of Wishbone accesses. Prescalers are compared
//! exactly; configuration, direction and output registers only on the bits
//! the test drives.

use tracing::{error, info};

use crate::common::constants::{
    GPIO_BASE, GPIO_DATAO, GPIO_DIR, I3C_BASE, I3C_PRESCALE, SPI_CFG, SPI_CFG_CPHA, SPI_CFG_CPOL,
    SPI_PR, SPI0_BASE, SPI1_BASE, UNMAPPED_ADDR,
};
use crate::env::BusTransactions;
use crate::verify::{CheckError, Expect, Verifier};

/// Runs the user-project register test, stopping at the first mismatch.
///
/// # Errors
///
/// Returns the first [`CheckError`] encountered.
pub fn user_project_test<B: BusTransactions + ?Sized>(bus: &mut B) -> Result<(), CheckError> {
    let mut v = Verifier::new(bus);

    info!("Testing SPI0 register access...");
    v.write(SPI0_BASE + SPI_PR, 0x10)?;
    let _ = v.check("SPI0 prescaler", SPI0_BASE + SPI_PR, Expect::exact(0x10))?;

    v.write(SPI0_BASE + SPI_CFG, SPI_CFG_CPOL | SPI_CFG_CPHA)?;
    let _ = v.check("SPI0 config", SPI0_BASE + SPI_CFG, Expect::masked(0x03, 0x03))?;

    info!("Testing I3C register access...");
    v.write(I3C_BASE + I3C_PRESCALE, 0x20)?;
    let _ = v.check("I3C prescaler", I3C_BASE + I3C_PRESCALE, Expect::exact(0x20))?;

    info!("Testing GPIO register access...");
    // pin 0 output, pin 1 input
    v.write(GPIO_BASE + GPIO_DIR, 0x01)?;
    let _ = v.check("GPIO direction", GPIO_BASE + GPIO_DIR, Expect::masked(0x03, 0x01))?;

    v.write(GPIO_BASE + GPIO_DATAO, 0x01)?;
    let _ = v.check("GPIO output", GPIO_BASE + GPIO_DATAO, Expect::masked(0x01, 0x01))?;

    info!("Testing address decode...");
    let actual = v.read(UNMAPPED_ADDR)?;
    if actual != 0 {
        let err = CheckError::DecodeLeak {
            addr: UNMAPPED_ADDR,
            actual,
        };
        error!("{err}");
        return Err(err);
    }

    info!("Testing multiple SPI instances...");
    v.write(SPI0_BASE + SPI_PR, 0x10)?;
    v.write(SPI1_BASE + SPI_PR, 0x20)?;

    let _ = v.check("SPI0 prescaler", SPI0_BASE + SPI_PR, Expect::exact(0x10))?;
    let _ = v.check("SPI1 prescaler", SPI1_BASE + SPI_PR, Expect::exact(0x20))?;

    info!("All tests passed!");
    Ok(())
}
