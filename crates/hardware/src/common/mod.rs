//! Common definitions shared by the hardware model, environment and verifier.
//!
//! 1. **Constants:** The user-project register map, bit fields and pad layout.
//! 2. **Error Handling:** Bus transaction and configuration errors.

/// User-project register map and pad layout.
pub mod constants;

/// Bus and configuration error types.
pub mod error;

pub use error::{BusError, ConfigError};
