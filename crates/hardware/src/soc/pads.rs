//! Caravel I/O pad configuration.
//!
//! Each of the 38 pads is owned either by the management SoC or by the user
//! project, and configured as input, output or bidirectional. The
//! management firmware programs the user-project pads before it signals the
//! testbench that it is ready.

use tracing::warn;

use crate::common::constants::{
    GPIO_PADS, I3C_PADS, PAD_COUNT, SPI_MISO_PADS, SPI_PAD_FIRST, SPI_PAD_LAST,
};

/// Configuration of a single I/O pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PadMode {
    /// Management-owned input without pull (power-on default).
    #[default]
    MgmtStdInputNopull,
    /// Management-owned output.
    MgmtStdOutput,
    /// User-owned input without pull.
    UserStdInputNopull,
    /// User-owned input with pull-down.
    UserStdInputPulldown,
    /// User-owned input with pull-up.
    UserStdInputPullup,
    /// User-owned output.
    UserStdOutput,
    /// User-owned bidirectional pad; direction follows the user output enable.
    UserStdBidirectional,
}

impl PadMode {
    /// Returns `true` if the user project owns the pad.
    pub const fn is_user(self) -> bool {
        matches!(
            self,
            Self::UserStdInputNopull
                | Self::UserStdInputPulldown
                | Self::UserStdInputPullup
                | Self::UserStdOutput
                | Self::UserStdBidirectional
        )
    }

    /// Returns `true` if the pad can be driven from the core side.
    pub const fn can_drive(self) -> bool {
        matches!(
            self,
            Self::MgmtStdOutput | Self::UserStdOutput | Self::UserStdBidirectional
        )
    }

    /// Returns `true` if the pad passes its external level to the core side.
    pub const fn can_sense(self) -> bool {
        !matches!(self, Self::MgmtStdOutput | Self::UserStdOutput)
    }
}

/// Bank of all Caravel I/O pads.
#[derive(Debug, Clone)]
pub struct PadBank {
    modes: [PadMode; PAD_COUNT],
    /// Levels driven onto the pads from outside the chip; bit `n` is pad `n`.
    external: u64,
}

impl Default for PadBank {
    fn default() -> Self {
        Self::new()
    }
}

impl PadBank {
    /// Creates a bank with every pad in its power-on mode.
    pub fn new() -> Self {
        Self {
            modes: [PadMode::default(); PAD_COUNT],
            external: 0,
        }
    }

    /// Sets the mode of `pad`; out-of-range pads are ignored.
    pub fn configure(&mut self, pad: usize, mode: PadMode) {
        match self.modes.get_mut(pad) {
            Some(slot) => *slot = mode,
            None => warn!(pad, "ignoring configuration of nonexistent pad"),
        }
    }

    /// Mode of `pad`, or `None` if it does not exist.
    pub fn mode(&self, pad: usize) -> Option<PadMode> {
        self.modes.get(pad).copied()
    }

    /// Drives `pad` from outside the chip.
    pub fn drive_external(&mut self, pad: usize, level: bool) {
        if pad < PAD_COUNT {
            if level {
                self.external |= 1 << pad;
            } else {
                self.external &= !(1 << pad);
            }
        }
    }

    /// Level the core sees on `pad`; pads that cannot sense read low.
    pub fn sensed_level(&self, pad: usize) -> bool {
        self.mode(pad).is_some_and(PadMode::can_sense) && (self.external >> pad) & 1 != 0
    }

    /// Restores every pad to its power-on mode.
    pub fn reset(&mut self) {
        self.modes = [PadMode::default(); PAD_COUNT];
    }
}

/// Pad setup performed by the user-project test firmware.
///
/// SPI pads 8..=23 are outputs except each instance's MISO, which is a
/// no-pull input; the I3C and GPIO pads are bidirectional.
pub fn user_project_pad_setup(pads: &mut PadBank) {
    for pad in SPI_PAD_FIRST..=SPI_PAD_LAST {
        if SPI_MISO_PADS.contains(&pad) {
            pads.configure(pad, PadMode::UserStdInputNopull);
        } else {
            pads.configure(pad, PadMode::UserStdOutput);
        }
    }
    for pad in I3C_PADS.into_iter().chain(GPIO_PADS) {
        pads.configure(pad, PadMode::UserStdBidirectional);
    }
}
