//! Configuration for the user-project model and its test environment.
//!
//! This module defines every knob of the simulated Caravel environment. It provides:
//! 1. **Defaults:** Conservative bus and boot timings.
//! 2. **Structures:** Hierarchical config for the bus, environment and peripherals.
//!
//! The peripheral memory map is fixed (see [`crate::common::constants`]) and is not configurable.
//! 3. **Loading:** JSON parsing from a string or a file, followed by consistency checks.
//!
//! Every field has a default, so an empty JSON object (`{}`) is a complete configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Cycles from `STB_O` to `ACK_I` for a decoded access.
    pub const fn ack_latency() -> u64 {
        1
    }

    /// Cycles the master waits for `ACK_I` before reporting a stalled bus.
    pub const fn ack_timeout_cycles() -> u64 {
        1_000
    }

    /// Cycles reset is held after power-up.
    pub const fn reset_cycles() -> u64 {
        10
    }

    /// Cycles the management firmware needs before it touches the GPIOs.
    pub const fn firmware_boot_cycles() -> u64 {
        100
    }

    /// Cycles the environment waits for the firmware ready signal.
    pub const fn ready_timeout_cycles() -> u64 {
        10_000
    }

    /// Testbench wires every MOSI pad back to its MISO pad.
    pub const fn spi_loopback() -> bool {
        true
    }

    /// Depth of each SPI RX and TX FIFO in bytes.
    pub const fn spi_fifo_depth() -> usize {
        16
    }

    /// Number of pins in the GPIO block.
    pub const fn gpio_pins() -> u32 {
        2
    }
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use caravel_periph_core::config::Config;
///
/// let config = Config::default();
/// assert!(!config.bus.strict_decode);
///
/// let config = Config::from_json_str(r#"{ "bus": { "ack_latency": 3 } }"#).unwrap();
/// assert_eq!(config.bus.ack_latency, 3);
/// assert_eq!(config.env.reset_cycles, 10);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Wishbone interconnect timing and decode policy.
    #[serde(default)]
    pub bus: BusConfig,
    /// Environment bring-up timing.
    #[serde(default)]
    pub env: EnvConfig,
    /// Peripheral model parameters.
    #[serde(default)]
    pub peripherals: PeripheralConfig,
}

/// Wishbone interconnect parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BusConfig {
    /// Clock cycles between strobe and acknowledge.
    #[serde(default = "defaults::ack_latency")]
    pub ack_latency: u64,
    /// Cycles the master waits for an acknowledge before failing the transaction.
    #[serde(default = "defaults::ack_timeout_cycles")]
    pub ack_timeout_cycles: u64,
    /// Answer unmapped accesses with a bus error instead of reading zero.
    #[serde(default)]
    pub strict_decode: bool,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            ack_latency: defaults::ack_latency(),
            ack_timeout_cycles: defaults::ack_timeout_cycles(),
            strict_decode: false,
        }
    }
}

/// Environment bring-up timing.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvConfig {
    /// Cycles reset is held before release.
    #[serde(default = "defaults::reset_cycles")]
    pub reset_cycles: u64,
    /// Cycles the management firmware runs before it configures the pads.
    #[serde(default = "defaults::firmware_boot_cycles")]
    pub firmware_boot_cycles: u64,
    /// Cycles to wait for the management GPIO ready signal.
    #[serde(default = "defaults::ready_timeout_cycles")]
    pub ready_timeout_cycles: u64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            reset_cycles: defaults::reset_cycles(),
            firmware_boot_cycles: defaults::firmware_boot_cycles(),
            ready_timeout_cycles: defaults::ready_timeout_cycles(),
        }
    }
}

/// Peripheral model parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeripheralConfig {
    /// Each SPI MOSI pad is wired back to its MISO pad.
    #[serde(default = "defaults::spi_loopback")]
    pub spi_loopback: bool,
    /// Depth of the SPI RX and TX FIFOs.
    #[serde(default = "defaults::spi_fifo_depth")]
    pub spi_fifo_depth: usize,
    /// Number of GPIO pins.
    #[serde(default = "defaults::gpio_pins")]
    pub gpio_pins: u32,
}

impl Default for PeripheralConfig {
    fn default() -> Self {
        Self {
            spi_loopback: defaults::spi_loopback(),
            spi_fifo_depth: defaults::spi_fifo_depth(),
            gpio_pins: defaults::gpio_pins(),
        }
    }
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Arguments
    ///
    /// * `json` - JSON text; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// [`ConfigError::Invalid`] when [`Config::validate`] rejects the result.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Config::from_json_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found:
    /// a zero FIFO depth, a GPIO width outside `1..=32`, or a zero ack timeout.
    /// A timeout shorter than the ack latency is accepted and models a slave
    /// that never answers in time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.peripherals.spi_fifo_depth == 0 {
            return Err(ConfigError::Invalid(
                "spi_fifo_depth must be at least 1".to_string(),
            ));
        }
        if !(1..=32).contains(&self.peripherals.gpio_pins) {
            return Err(ConfigError::Invalid(format!(
                "gpio_pins = {}, expected 1..=32",
                self.peripherals.gpio_pins
            )));
        }
        if self.bus.ack_timeout_cycles == 0 {
            return Err(ConfigError::Invalid(
                "ack_timeout_cycles must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
