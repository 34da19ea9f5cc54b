//! # Configuration Tests
//!
//! Tests for configuration defaults, JSON deserialization, file loading
//! and validation.

use std::io::Write;

use caravel_periph_core::common::error::ConfigError;
use caravel_periph_core::config::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// 1. Defaults
// ══════════════════════════════════════════════════════════

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_bus_config_defaults() {
    let bus = BusConfig::default();
    assert_eq!(bus.ack_latency, 1);
    assert_eq!(bus.ack_timeout_cycles, 1000);
    assert!(!bus.strict_decode);
}

#[test]
fn test_env_config_defaults() {
    let env = EnvConfig::default();
    assert_eq!(env.reset_cycles, 10);
    assert_eq!(env.firmware_boot_cycles, 100);
    assert_eq!(env.ready_timeout_cycles, 10_000);
}

#[test]
fn test_peripheral_config_defaults() {
    let p = PeripheralConfig::default();
    assert!(p.spi_loopback);
    assert_eq!(p.spi_fifo_depth, 16);
    assert_eq!(p.gpio_pins, 2);
}

// ══════════════════════════════════════════════════════════
// 2. JSON loading
// ══════════════════════════════════════════════════════════

#[test]
fn test_empty_object_is_default() {
    let config = Config::from_json_str("{}").unwrap();
    assert_eq!(config.bus.ack_latency, 1);
    assert_eq!(config.peripherals.gpio_pins, 2);
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let config =
        Config::from_json_str(r#"{ "peripherals": { "spi_loopback": false } }"#).unwrap();
    assert!(!config.peripherals.spi_loopback);
    assert_eq!(config.peripherals.spi_fifo_depth, 16);
}

#[test]
fn test_unknown_field_rejected() {
    let err = Config::from_json_str(r#"{ "bus": { "latency": 2 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_malformed_json_rejected() {
    assert!(matches!(
        Config::from_json_str("{ bus: "),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "bus": {{ "ack_latency": 4, "strict_decode": true }}, "env": {{ "reset_cycles": 3 }} }}"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.bus.ack_latency, 4);
    assert!(config.bus.strict_decode);
    assert_eq!(config.env.reset_cycles, 3);
}

#[test]
fn test_from_file_validates() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "peripherals": {{ "gpio_pins": 0 }} }}"#).unwrap();
    assert!(matches!(
        Config::from_file(file.path()),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    match Config::from_file(&path) {
        Err(ConfigError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

// ══════════════════════════════════════════════════════════
// 3. Validation
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::zero_fifo(r#"{ "peripherals": { "spi_fifo_depth": 0 } }"#, "spi_fifo_depth")]
#[case::no_gpio(r#"{ "peripherals": { "gpio_pins": 0 } }"#, "gpio_pins")]
#[case::wide_gpio(r#"{ "peripherals": { "gpio_pins": 33 } }"#, "gpio_pins")]
#[case::zero_timeout(r#"{ "bus": { "ack_timeout_cycles": 0 } }"#, "ack_timeout_cycles")]
fn test_invalid_config_rejected(#[case] json: &str, #[case] needle: &str) {
    match Config::from_json_str(json) {
        Err(ConfigError::Invalid(msg)) => assert!(msg.contains(needle), "message: {msg}"),
        other => panic!("expected Invalid error, got {other:?}"),
    }
}

#[test]
fn test_timeout_shorter_than_latency_accepted() {
    let config =
        Config::from_json_str(r#"{ "bus": { "ack_latency": 10, "ack_timeout_cycles": 3 } }"#);
    assert!(config.is_ok());
}

#[rstest]
#[case::gpio_over_unmapped(r#"{ "system": { "gpio_base": 805318656 } }"#)]
#[case::spi_bases(r#"{ "system": { "spi_bases": [805306368] } }"#)]
fn test_memory_map_is_not_configurable(#[case] json: &str) {
    assert!(matches!(
        Config::from_json_str(json),
        Err(ConfigError::Parse(_))
    ));
}
