//! Caravel environment configurator.
//!
//! Brings the simulated chip out of reset, waits for the management firmware
//! to configure the user pads, and then acts as the Wishbone master for the
//! test: every read or write clocks the chip until the slave terminates the
//! cycle.

use tracing::{debug, info};

use crate::common::error::BusError;
use crate::config::Config;
use crate::env::{BusTransactions, EnvError};
use crate::soc::System;
use crate::soc::interconnect::WbRequest;
use crate::stats::BusStats;

/// A configured environment, ready to drive bus transactions.
#[derive(Debug)]
pub struct CaravelEnv {
    system: System,
    ack_timeout_cycles: u64,
}

impl CaravelEnv {
    /// Configures the environment: build, reset, boot, and wait for firmware ready.
    ///
    /// # Arguments
    ///
    /// * `config` - Environment configuration; validated before use.
    ///
    /// # Errors
    ///
    /// * [`EnvError::Config`] if `config` is inconsistent.
    /// * [`EnvError::Bus`] if the user project cannot be assembled.
    /// * [`EnvError::FirmwareTimeout`] if the firmware does not signal ready in time.
    pub fn configure(config: &Config) -> Result<Self, EnvError> {
        config.validate()?;
        let mut system = System::new(config)?;

        system.set_reset(true);
        for _ in 0..config.env.reset_cycles {
            let _ = system.tick();
        }
        system.set_reset(false);
        debug!(cycles = config.env.reset_cycles, "reset released");

        let mut waited = 0;
        while !system.firmware_ready() {
            if waited >= config.env.ready_timeout_cycles {
                return Err(EnvError::FirmwareTimeout { cycles: waited });
            }
            let _ = system.tick();
            waited += 1;
        }
        info!(cycle = system.cycle(), "caravel environment configured");

        Ok(Self {
            system,
            ack_timeout_cycles: config.bus.ack_timeout_cycles,
        })
    }

    /// Runs the clock for `cycles` cycles with no transaction in flight.
    pub fn wait_cycles(&mut self, cycles: u64) {
        for _ in 0..cycles {
            let _ = self.system.tick();
        }
    }

    /// Clock cycles elapsed since construction.
    pub fn cycle(&self) -> u64 {
        self.system.cycle()
    }

    /// Bus statistics.
    pub fn stats(&self) -> &BusStats {
        self.system.bus.stats()
    }

    /// The simulated chip.
    pub fn system(&self) -> &System {
        &self.system
    }

    /// The simulated chip, for testbench-side stimulus (pads, MISO input).
    pub fn system_mut(&mut self) -> &mut System {
        &mut self.system
    }

    fn transact(&mut self, req: WbRequest) -> Result<u32, BusError> {
        self.system.bus.begin(req)?;
        for _ in 0..self.ack_timeout_cycles {
            if let Some(result) = self.system.tick() {
                return result;
            }
        }
        self.system.bus.abort();
        Err(BusError::AckTimeout {
            addr: req.addr,
            cycles: self.ack_timeout_cycles,
        })
    }
}

impl BusTransactions for CaravelEnv {
    fn write(&mut self, addr: u32, value: u32) -> Result<(), BusError> {
        self.transact(WbRequest::write(addr, value)).map(|_| ())
    }

    fn read(&mut self, addr: u32) -> Result<u32, BusError> {
        self.transact(WbRequest::read(addr))
    }
}
