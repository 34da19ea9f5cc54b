//! GPIO register model tests.

use caravel_periph_core::common::constants::*;
use caravel_periph_core::soc::devices::{Device, Gpio};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_inputs_and_outputs_mix_in_datai() {
    let mut gpio = Gpio::new(GPIO_BASE, 2);
    gpio.write_u32(GPIO_DIR, 0b01);
    gpio.write_u32(GPIO_DATAO, 0b01);
    gpio.set_pad_inputs(0b10);
    assert_eq!(gpio.read_u32(GPIO_DATAI), 0b11);

    gpio.set_pad_inputs(0b01);
    assert_eq!(gpio.read_u32(GPIO_DATAI), 0b01, "output pin ignores pad input");
}

#[test]
fn test_registers_mask_to_pin_count() {
    let mut gpio = Gpio::new(GPIO_BASE, 2);
    gpio.write_u32(GPIO_DIR, 0xFF);
    gpio.write_u32(GPIO_DATAO, 0xFF);
    assert_eq!(gpio.read_u32(GPIO_DIR), 0b11);
    assert_eq!(gpio.read_u32(GPIO_DATAO), 0b11);
}

#[test]
fn test_datai_is_read_only() {
    let mut gpio = Gpio::new(GPIO_BASE, 2);
    gpio.write_u32(GPIO_DATAI, 0b11);
    assert_eq!(gpio.read_u32(GPIO_DATAI), 0);
}

#[test]
fn test_pad_outputs_gate_on_direction() {
    let mut gpio = Gpio::new(GPIO_BASE, 2);
    gpio.write_u32(GPIO_DATAO, 0b11);
    gpio.write_u32(GPIO_DIR, 0b10);
    assert_eq!(gpio.pad_outputs(), (0b10, 0b10));
}

#[rstest]
#[case(0, 1)]
#[case(2, 2)]
#[case(32, 32)]
#[case(40, 32)]
fn test_pin_count_clamped(#[case] requested: u32, #[case] pins: u32) {
    let mut gpio = Gpio::new(GPIO_BASE, requested);
    assert_eq!(gpio.pins(), pins);
    gpio.write_u32(GPIO_DIR, u32::MAX);
    assert_eq!(gpio.read_u32(GPIO_DIR).count_ones(), pins);
}

#[test]
fn test_reset_clears_latches() {
    let mut gpio = Gpio::new(GPIO_BASE, 2);
    gpio.write_u32(GPIO_DIR, 0b11);
    gpio.write_u32(GPIO_DATAO, 0b11);
    gpio.reset();
    assert_eq!(gpio.read_u32(GPIO_DIR), 0);
    assert_eq!(gpio.read_u32(GPIO_DATAO), 0);
    assert_eq!(gpio.name(), "GPIO");
}

#[test]
fn test_rising_edge_latches_ris() {
    let mut gpio = Gpio::new(GPIO_BASE, 2);
    assert_eq!(gpio.irq_id(), Some(GPIO_IRQ_LINE));
    assert!(gpio.has_irq_block());

    gpio.set_pad_inputs(0b10);
    assert!(!gpio.tick(), "edge latched but masked");
    assert_eq!(gpio.read_u32(IRQ_RIS), 0b10);

    gpio.set_pad_inputs(0b00);
    let _ = gpio.tick();
    assert_eq!(gpio.read_u32(IRQ_RIS), 0b10, "falling edge keeps the latch");

    gpio.write_u32(IRQ_IM, 0b10);
    assert_eq!(gpio.read_u32(IRQ_MIS), 0b10);
    assert!(gpio.tick());
}

#[test]
fn test_interrupt_clear_is_write_one_to_clear() {
    let mut gpio = Gpio::new(GPIO_BASE, 2);
    gpio.write_u32(IRQ_IM, 0xFF);
    assert_eq!(gpio.read_u32(IRQ_IM), 0b11, "mask limited to pin count");

    gpio.write_u32(GPIO_DIR, 0b01);
    gpio.write_u32(GPIO_DATAO, 0b01);
    gpio.set_pad_inputs(0b10);
    assert!(gpio.tick());
    assert_eq!(gpio.read_u32(IRQ_RIS), 0b11);

    gpio.write_u32(IRQ_IC, 0b01);
    assert_eq!(gpio.read_u32(IRQ_RIS), 0b10);
    gpio.write_u32(IRQ_IC, 0xFF);
    assert_eq!(gpio.read_u32(IRQ_RIS), 0);
    assert!(!gpio.tick(), "levels unchanged, no new edge");
}

#[test]
fn test_status_registers_are_read_only() {
    let mut gpio = Gpio::new(GPIO_BASE, 2);
    gpio.write_u32(IRQ_RIS, 0b11);
    gpio.write_u32(IRQ_MIS, 0b11);
    assert_eq!(gpio.read_u32(IRQ_RIS), 0);
    assert_eq!(gpio.read_u32(IRQ_MIS), 0);
    assert_eq!(gpio.read_u32(IRQ_IC), 0);
}
