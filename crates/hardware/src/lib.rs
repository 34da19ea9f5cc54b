//! Caravel user-project peripheral model and Wishbone register verifier.
//!
//! This crate models the user-project peripheral subsystem of a Caravel chip and verifies it over the bus:
//! 1. **SoC:** Wishbone interconnect with address decode, SPI masters, I3C controller, GPIO, pads and management core.
//! 2. **Environment:** Reset, firmware bring-up and a blocking bus-transaction provider.
//! 3. **Drivers:** Firmware-style SPI/I3C/GPIO routines generic over any provider.
//! 4. **Verification:** Exact and masked register checks, the user-project and smoke tests, and reports.
//! 5. **Configuration:** Address map, bus timing and peripheral options, with statistics collection.

/// Common types and constants (register map, pads, errors).
pub mod common;
/// Environment configuration (defaults, address map, timing, peripheral options).
pub mod config;
/// Firmware-style peripheral drivers.
pub mod drivers;
/// Test environment (bus-transaction provider, Caravel configurator).
pub mod env;
/// System-on-chip (builder, bus, devices, pads, management core, traits).
pub mod soc;
/// Bus statistics collection and reporting.
pub mod stats;
/// Register checks, test sequences and reports.
pub mod verify;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Configured environment; construct with `CaravelEnv::configure`.
pub use crate::env::CaravelEnv;
/// Simulated chip (bus, peripherals, pads, management core); construct with `System::new`.
pub use crate::soc::System;
