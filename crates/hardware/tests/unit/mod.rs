//! # Unit Components
//!
//! This module groups the unit tests by library module, from the
//! configuration and SoC model up to the verification sequences.

/// Unit tests for configuration defaults, loading and validation.
pub mod config;
