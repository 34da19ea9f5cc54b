//! Management SoC as seen by the testbench.
//!
//! The management core runs the user-project firmware. Only its externally
//! visible effects are modelled:
//!
//! * the power GPIO, which gates user-project power;
//! * the management GPIO, which the firmware raises once the user pads are configured;
//! * the pad configuration itself.
//!
//! The boot takes a fixed number of clocks, after which the firmware runs
//! its setup sequence in a single step and idles.

use tracing::debug;

use crate::soc::pads::{PadBank, user_project_pad_setup};

/// Firmware progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirmwareState {
    /// Held in reset.
    Reset,
    /// Executing boot code; `remaining` clocks until the test routine runs.
    Booting {
        /// Clocks left before the test routine starts.
        remaining: u64,
    },
    /// Setup done, spinning in the firmware's idle loop.
    Idle,
}

/// Management core and its two testbench-visible GPIOs.
#[derive(Debug, Clone)]
pub struct ManagementCore {
    boot_cycles: u64,
    state: FirmwareState,
    mgmt_gpio_oe: bool,
    mgmt_gpio: bool,
    power_gpio_oe: bool,
    power_gpio: bool,
}

impl ManagementCore {
    /// Creates a core held in reset that needs `boot_cycles` clocks to boot.
    pub fn new(boot_cycles: u64) -> Self {
        Self {
            boot_cycles,
            state: FirmwareState::Reset,
            mgmt_gpio_oe: false,
            mgmt_gpio: false,
            power_gpio_oe: false,
            power_gpio: false,
        }
    }

    /// Current firmware state.
    pub fn state(&self) -> FirmwareState {
        self.state
    }

    /// Asserts reset: GPIOs return to inputs and the firmware restarts on release.
    pub fn hold_reset(&mut self) {
        *self = Self::new(self.boot_cycles);
    }

    /// Releases reset and starts booting.
    pub fn release_reset(&mut self) {
        if self.state == FirmwareState::Reset {
            self.state = FirmwareState::Booting {
                remaining: self.boot_cycles,
            };
        }
    }

    /// Level of the management GPIO as seen by the testbench.
    pub fn mgmt_gpio(&self) -> bool {
        self.mgmt_gpio_oe && self.mgmt_gpio
    }

    /// Whether the firmware has switched user-project power on.
    pub fn user_power(&self) -> bool {
        self.power_gpio_oe && self.power_gpio
    }

    /// Advances the firmware by one clock.
    pub fn tick(&mut self, pads: &mut PadBank) {
        if let FirmwareState::Booting { remaining } = self.state {
            if remaining > 1 {
                self.state = FirmwareState::Booting {
                    remaining: remaining - 1,
                };
            } else {
                self.run_user_project_setup(pads);
                self.state = FirmwareState::Idle;
            }
        }
    }

    fn run_user_project_setup(&mut self, pads: &mut PadBank) {
        self.mgmt_gpio_oe = true;
        self.mgmt_gpio = false;

        self.power_gpio_oe = true;
        self.power_gpio = true;

        user_project_pad_setup(pads);

        self.mgmt_gpio = true;
        debug!("firmware: user pads configured, ready signalled");
    }
}
