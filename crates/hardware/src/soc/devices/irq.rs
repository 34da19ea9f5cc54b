//! IM/MIS/RIS/IC interrupt block common to the user-project peripherals.
//!
//! Sources latch into RIS when raised and stay set until software writes a 1
//! to the matching IC bit. MIS is RIS filtered by IM; a device asserts its IRQ
//! line while MIS is non-zero.

use crate::common::constants::{IRQ_IC, IRQ_IM, IRQ_MIS, IRQ_RIS};

/// Interrupt registers of one peripheral.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IrqBlock {
    sources: u32,
    im: u32,
    ris: u32,
}

impl IrqBlock {
    /// Creates a block with `sources` as the implemented source bits.
    pub const fn new(sources: u32) -> Self {
        Self {
            sources,
            im: 0,
            ris: 0,
        }
    }

    /// Latches the given source bits into RIS.
    pub const fn raise(&mut self, bits: u32) {
        self.ris |= bits & self.sources;
    }

    /// Masked status.
    pub const fn mis(&self) -> u32 {
        self.ris & self.im
    }

    /// Raw status.
    pub const fn ris(&self) -> u32 {
        self.ris
    }

    /// Whether the device's interrupt line is asserted.
    pub const fn pending(&self) -> bool {
        self.mis() != 0
    }

    /// Returns `Some(value)` if `offset` is one of the block's registers.
    pub const fn read(&self, offset: u32) -> Option<u32> {
        match offset {
            IRQ_IM => Some(self.im),
            IRQ_MIS => Some(self.mis()),
            IRQ_RIS => Some(self.ris),
            IRQ_IC => Some(0),
            _ => None,
        }
    }

    /// Handles a write; returns `false` if `offset` is not one of the block's registers.
    pub const fn write(&mut self, offset: u32, val: u32) -> bool {
        match offset {
            IRQ_IM => self.im = val & self.sources,
            IRQ_IC => self.ris &= !val,
            IRQ_MIS | IRQ_RIS => {}
            _ => return false,
        }
        true
    }

    /// Clears mask and status.
    pub const fn reset(&mut self) {
        self.im = 0;
        self.ris = 0;
    }
}
