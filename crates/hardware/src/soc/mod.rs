//! Simulated Caravel chip.
//!
//! This module organizes the components of the simulated chip: the
//! user-project Wishbone interconnect and its peripherals, the I/O pads,
//! the management core, and the builder that assembles them.

/// Chip builder and top-level `System`.
pub mod builder;

/// User-project peripheral models.
pub mod devices;

/// Wishbone interconnect and address decode.
pub mod interconnect;

/// Management core and firmware bring-up.
pub mod management;

/// I/O pad configuration.
pub mod pads;

/// Device trait definitions for Wishbone access.
pub mod traits;

pub use builder::System;
