//! Register access verification.
//!
//! This module checks observed register values against literal expectations. It provides:
//! 1. **Expectations:** Exact or masked comparison, chosen per register.
//! 2. **Verifier:** A thin wrapper over a bus provider that logs and checks every access.
//! 3. **Sequences:** The user-project register test and the firmware smoke test.
//! 4. **Reporting:** A serializable per-test report and a registry of runnable tests.
//!
//! Checks are fail-fast: the first mismatch is returned as an error and nothing
//! after it runs.

use thiserror::Error;
use tracing::{error, trace};

use crate::common::error::BusError;
use crate::drivers::DriverError;
use crate::env::BusTransactions;

/// Per-test reports and the test registry.
pub mod report;
/// User-project register access sequence.
pub mod sequence;
/// Firmware smoke test.
pub mod smoke;

pub use report::{TestCase, TestReport, report_test};
pub use sequence::user_project_test;
pub use smoke::smoke_test;

/// Verification failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// A register did not hold the expected value.
    #[error("{label} mismatch: expected {expected:#04x}, got {actual:#04x}")]
    Mismatch {
        /// Register description used in the message.
        label: String,
        /// Expected value (after masking, for masked checks).
        expected: u32,
        /// Raw value read from the bus.
        actual: u32,
    },

    /// An address outside every peripheral window returned data.
    #[error("invalid address {addr:#010x} should return 0, got {actual:08x}")]
    DecodeLeak {
        /// Address that was read.
        addr: u32,
        /// Value read back.
        actual: u32,
    },

    /// A bus transaction failed.
    #[error(transparent)]
    Bus(#[from] BusError),

    /// A driver routine failed.
    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// How a read value is compared against its expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// The whole word must match.
    Exact(u32),
    /// Only the bits in `mask` are compared.
    Masked {
        /// Bits that take part in the comparison.
        mask: u32,
        /// Expected value of those bits.
        value: u32,
    },
}

impl Expect {
    /// Exact comparison against `value`.
    pub const fn exact(value: u32) -> Self {
        Self::Exact(value)
    }

    /// Comparison of `actual & mask` against `value`.
    pub const fn masked(mask: u32, value: u32) -> Self {
        Self::Masked { mask, value }
    }

    /// Returns `true` if `actual` satisfies the expectation.
    pub const fn matches(self, actual: u32) -> bool {
        match self {
            Self::Exact(value) => actual == value,
            Self::Masked { mask, value } => actual & mask == value,
        }
    }

    /// Value reported as "expected" in a mismatch.
    pub const fn expected(self) -> u32 {
        match self {
            Self::Exact(value) | Self::Masked { value, .. } => value,
        }
    }
}

/// Checks register values over a bus provider.
#[derive(Debug)]
pub struct Verifier<B> {
    bus: B,
}

impl<B: BusTransactions> Verifier<B> {
    /// Wraps a provider; pass `&mut provider` to keep ownership.
    pub const fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Underlying provider, for driver calls between checks.
    pub const fn bus(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Writes `value` to `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Bus`] if the transaction fails.
    pub fn write(&mut self, addr: u32, value: u32) -> Result<(), CheckError> {
        trace!("write {addr:#010x} <= {value:#x}");
        self.bus.write(addr, value)?;
        Ok(())
    }

    /// Reads `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Bus`] if the transaction fails.
    pub fn read(&mut self, addr: u32) -> Result<u32, CheckError> {
        let value = self.bus.read(addr)?;
        trace!("read {addr:#010x} => {value:#x}");
        Ok(value)
    }

    /// Reads `addr` and compares it against `expect`.
    ///
    /// # Returns
    ///
    /// The raw value read.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Mismatch`] if the value does not satisfy `expect`.
    pub fn check(&mut self, label: &str, addr: u32, expect: Expect) -> Result<u32, CheckError> {
        let actual = self.read(addr)?;
        verify_value(label, actual, expect)?;
        Ok(actual)
    }
}

/// Compares an already-read value against `expect`.
///
/// # Errors
///
/// Returns [`CheckError::Mismatch`] if `actual` does not satisfy `expect`.
pub fn verify_value(label: &str, actual: u32, expect: Expect) -> Result<(), CheckError> {
    if expect.matches(actual) {
        return Ok(());
    }
    let err = CheckError::Mismatch {
        label: label.to_string(),
        expected: expect.expected(),
        actual,
    };
    error!("{err}");
    Err(err)
}
