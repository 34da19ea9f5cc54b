//! Chip builder tests.

use caravel_periph_core::common::constants::{
    GPIO_BASE, GPIO_DATAI, GPIO_IRQ_LINE, GPIO_PADS, IRQ_IC, IRQ_IM, PERIPHERAL_WINDOWS, SPI1_BASE,
    UNMAPPED_ADDR, USER_BASE,
};
use caravel_periph_core::common::error::BusError;
use caravel_periph_core::config::Config;
use caravel_periph_core::soc::System;
use caravel_periph_core::soc::interconnect::WbRequest;
use pretty_assertions::assert_eq;

use crate::common::harness::fast_config;

fn run_to_ready(system: &mut System) {
    system.set_reset(false);
    for _ in 0..100 {
        if system.firmware_ready() {
            return;
        }
        let _ = system.tick();
    }
    panic!("firmware never became ready");
}

fn transact(system: &mut System, req: WbRequest) -> Result<u32, BusError> {
    system.bus.begin(req)?;
    loop {
        if let Some(result) = system.tick() {
            return result;
        }
    }
}

#[test]
fn test_default_devices() {
    let system = System::new(&Config::default()).unwrap();
    assert_eq!(
        system.bus.device_names(),
        ["SPI0", "SPI1", "SPI2", "SPI3", "I3C", "GPIO"]
    );
    assert!(system.in_reset());
    assert!(!system.bus.is_powered());
}

#[test]
fn test_fixed_map_decodes() {
    let system = System::new(&Config::default()).unwrap();
    for (index, (name, base, size)) in PERIPHERAL_WINDOWS.into_iter().enumerate() {
        assert_eq!(system.bus.device_names()[index], name);
        assert_eq!(system.bus.decode(base), Some((index, 0)), "{name}");
        assert_eq!(system.bus.decode(base + size - 4), Some((index, size - 4)), "{name}");
        assert_eq!(
            system.bus.decode(base + IRQ_IC),
            Some((index, IRQ_IC)),
            "{name} interrupt block"
        );
    }
    assert!(!system.bus.is_mapped(UNMAPPED_ADDR));
    assert!(!system.bus.is_mapped(USER_BASE - 4));
}

#[test]
fn test_gpio_edge_drives_user_irq() {
    let mut system = System::new(&fast_config()).unwrap();
    run_to_ready(&mut system);
    assert_eq!(
        transact(&mut system, WbRequest::write(GPIO_BASE + IRQ_IM, 0b10)),
        Ok(0)
    );
    assert_eq!(system.bus.irq_lines(), 0);

    system.pads.drive_external(GPIO_PADS[1], true);
    let _ = system.tick();
    let _ = system.tick();
    assert_eq!(system.bus.irq_lines(), 1 << GPIO_IRQ_LINE);

    assert_eq!(
        transact(&mut system, WbRequest::write(GPIO_BASE + IRQ_IC, 0b10)),
        Ok(0)
    );
    let _ = system.tick();
    assert_eq!(system.bus.irq_lines(), 0);
}

#[test]
fn test_clock_stalls_in_reset() {
    let mut system = System::new(&fast_config()).unwrap();
    for _ in 0..50 {
        assert_eq!(system.tick(), None);
    }
    assert_eq!(system.cycle(), 50);
    assert!(!system.firmware_ready());
    assert!(!system.bus.is_powered());
}

#[test]
fn test_firmware_powers_user_project() {
    let mut system = System::new(&fast_config()).unwrap();
    run_to_ready(&mut system);
    assert!(system.bus.is_powered());
    assert!(system.mgmt.user_power());
}

#[test]
fn test_reset_powers_down() {
    let mut system = System::new(&fast_config()).unwrap();
    run_to_ready(&mut system);
    system.set_reset(true);
    assert!(!system.bus.is_powered());
    assert!(!system.firmware_ready());
}

#[test]
fn test_gpio_pads_feed_datai() {
    let mut system = System::new(&fast_config()).unwrap();
    run_to_ready(&mut system);
    system.pads.drive_external(GPIO_PADS[1], true);
    let _ = system.tick();
    assert_eq!(
        transact(&mut system, WbRequest::read(GPIO_BASE + GPIO_DATAI)),
        Ok(0b10)
    );
}

#[test]
fn test_miso_stimulus_reaches_spi() {
    let mut config = fast_config();
    config.peripherals.spi_loopback = false;
    let mut system = System::new(&config).unwrap();
    run_to_ready(&mut system);
    system.bus.spi_mut(1).unwrap().set_miso_byte(0x42);
    assert_eq!(
        transact(&mut system, WbRequest::write(SPI1_BASE + 0x04, 0x99)),
        Ok(0)
    );
    assert_eq!(
        transact(&mut system, WbRequest::write(SPI1_BASE + 0x0C, 1)),
        Ok(0)
    );
    for _ in 0..16 {
        let _ = system.tick();
    }
    assert_eq!(
        transact(&mut system, WbRequest::read(SPI1_BASE)),
        Ok(0x42)
    );
}
