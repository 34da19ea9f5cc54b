//! Bus and configuration error definitions.
//!
//! This module defines the errors raised below the verification layer. It provides:
//! 1. **Bus Errors:** Every way a Wishbone transaction can fail to complete normally.
//! 2. **Configuration Errors:** Load, parse and consistency failures for [`Config`](crate::config::Config).

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single Wishbone transaction.
///
/// None of these are retried by the interconnect; callers decide whether a
/// failure is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusError {
    /// A transaction was started while another was still in flight.
    #[error("bus busy: transaction to {pending:#010x} still in flight")]
    Busy {
        /// Address of the transaction that is still outstanding.
        pending: u32,
    },

    /// The address is not aligned to the 32-bit data bus.
    #[error("misaligned access at {addr:#010x}")]
    Misaligned {
        /// Offending address.
        addr: u32,
    },

    /// No peripheral decodes the address and strict decode is enabled (`ERR_O`).
    #[error("unmapped access at {addr:#010x}")]
    Unmapped {
        /// Offending address.
        addr: u32,
    },

    /// The user project is not powered, so its Wishbone slave never answers.
    #[error("user project powered down (access at {addr:#010x})")]
    PoweredDown {
        /// Offending address.
        addr: u32,
    },

    /// The acknowledge did not arrive within the provider's wait budget.
    #[error("no ack for {addr:#010x} after {cycles} cycles")]
    AckTimeout {
        /// Address of the stalled transaction.
        addr: u32,
        /// Cycles waited before giving up.
        cycles: u64,
    },

    /// A device window overlaps one that is already registered.
    #[error("window of {name} at {base:#010x}+{size:#x} overlaps {other}")]
    Overlap {
        /// Device being registered.
        name: String,
        /// Its base address.
        base: u32,
        /// Its window size.
        size: u32,
        /// Name of the device already occupying part of the window.
        other: String,
    },
}

/// Failure to load or validate a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but is internally inconsistent.
    #[error("inconsistent config: {0}")]
    Invalid(String),
}
