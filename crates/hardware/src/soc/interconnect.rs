//! User-project Wishbone interconnect.
//!
//! This module implements the slave side of the Caravel Wishbone port. It provides:
//! 1. **Device registration:** Devices are added by window, rejected on overlap and sorted for lookup.
//! 2. **Address decode:** Routes a word address to a device and window-relative offset,
//!    including each device's interrupt block at `base + 0xFF00`.
//! 3. **Transactions:** A single outstanding classic-cycle transaction, acknowledged after a fixed latency.
//! 4. **Tick and IRQ:** Every device is ticked each cycle and interrupt lines are collected.
//! 5. **Power:** The slave is held in reset while the user project is unpowered.

use std::fmt;

use tracing::trace;

use super::devices::{Device, Gpio, I3c, Spi};
use crate::common::constants::{IRQ_BLOCK_OFFSET, IRQ_BLOCK_SIZE};
use crate::common::error::BusError;
use crate::stats::BusStats;

/// Direction and payload of a Wishbone transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WbOp {
    /// Read cycle (`WE_O` low).
    Read,
    /// Write cycle (`WE_O` high) carrying `DAT_O`.
    Write(u32),
}

/// A Wishbone request as presented by the master.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WbRequest {
    /// Byte address (`ADR_O`).
    pub addr: u32,
    /// Read or write.
    pub op: WbOp,
}

impl WbRequest {
    /// Builds a read request.
    pub const fn read(addr: u32) -> Self {
        Self {
            addr,
            op: WbOp::Read,
        }
    }

    /// Builds a write request.
    pub const fn write(addr: u32, value: u32) -> Self {
        Self {
            addr,
            op: WbOp::Write(value),
        }
    }
}

/// Address windows decoded for `dev`: its register window, then its interrupt block.
fn windows(dev: &dyn Device) -> impl Iterator<Item = (u32, u32)> {
    let (base, size) = dev.address_range();
    let irq_block = if dev.has_irq_block() {
        base.checked_add(IRQ_BLOCK_OFFSET)
            .map(|irq_base| (irq_base, IRQ_BLOCK_SIZE))
    } else {
        None
    };
    std::iter::once((base, size)).chain(irq_block)
}

/// Offset of `addr` within `dev`, measured from the device base.
fn claim(dev: &dyn Device, addr: u32) -> Option<u32> {
    let hit = windows(dev)
        .any(|(start, size)| addr >= start && u64::from(addr) < u64::from(start) + u64::from(size));
    if hit {
        addr.checked_sub(dev.address_range().0)
    } else {
        None
    }
}

/// Transaction waiting for its acknowledge.
#[derive(Debug, Clone, Copy)]
struct Pending {
    req: WbRequest,
    remaining: u64,
}

/// Wishbone interconnect routing user-project accesses by address.
pub struct Bus {
    devices: Vec<Box<dyn Device>>,
    /// Cycles between strobe and acknowledge for every access.
    pub ack_latency: u64,
    /// Terminate unmapped accesses with `ERR_I` instead of reading zero.
    pub strict_decode: bool,
    powered: bool,
    pending: Option<Pending>,
    irq_lines: u32,
    last_device_idx: usize,
    stats: BusStats,
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus")
            .field(
                "devices",
                &self.devices.iter().map(|d| d.name()).collect::<Vec<_>>(),
            )
            .field("ack_latency", &self.ack_latency)
            .field("strict_decode", &self.strict_decode)
            .field("powered", &self.powered)
            .field("pending", &self.pending)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Bus {
    /// Creates an unpowered bus with no devices.
    ///
    /// # Arguments
    ///
    /// * `ack_latency` - Cycles from strobe to acknowledge; 0 and 1 both acknowledge on the next tick.
    /// * `strict_decode` - Answer unmapped accesses with a bus error.
    pub fn new(ack_latency: u64, strict_decode: bool) -> Self {
        Self {
            devices: Vec::new(),
            ack_latency,
            strict_decode,
            powered: false,
            pending: None,
            irq_lines: 0,
            last_device_idx: 0,
            stats: BusStats::default(),
        }
    }

    /// Registers a device; devices are kept sorted by base address.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Overlap`] if any window of the device, including its
    /// interrupt block, intersects one already registered.
    pub fn add_device(&mut self, dev: Box<dyn Device>) -> Result<(), BusError> {
        let (base, size) = dev.address_range();
        let intersects = |a: (u32, u32), b: (u32, u32)| {
            u64::from(a.0) < u64::from(b.0) + u64::from(b.1)
                && u64::from(b.0) < u64::from(a.0) + u64::from(a.1)
        };
        if let Some(other) = self.devices.iter().find(|d| {
            windows(dev.as_ref())
                .any(|mine| windows(d.as_ref()).any(|theirs| intersects(mine, theirs)))
        }) {
            return Err(BusError::Overlap {
                name: dev.name().to_string(),
                base,
                size,
                other: other.name().to_string(),
            });
        }
        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
        self.last_device_idx = 0;
        Ok(())
    }

    /// Names of the registered devices in address order.
    pub fn device_names(&self) -> Vec<&str> {
        self.devices.iter().map(|d| d.name()).collect()
    }

    /// Returns whether the user project is powered.
    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Switches user-project power.
    ///
    /// Powering up resets every device; powering down drops any transaction in flight.
    pub fn set_powered(&mut self, powered: bool) {
        if powered && !self.powered {
            for dev in &mut self.devices {
                dev.reset();
            }
        }
        if !powered {
            self.pending = None;
            self.irq_lines = 0;
        }
        self.powered = powered;
    }

    /// Resolves `addr` to the index of the owning device and the window-relative offset.
    pub fn decode(&self, addr: u32) -> Option<(usize, u32)> {
        self.devices
            .iter()
            .enumerate()
            .find_map(|(i, d)| claim(d.as_ref(), addr).map(|offset| (i, offset)))
    }

    /// Returns whether the given address falls inside any device window.
    pub fn is_mapped(&self, addr: u32) -> bool {
        self.decode(addr).is_some()
    }

    /// Statistics since construction.
    pub fn stats(&self) -> &BusStats {
        &self.stats
    }

    /// Bitmask of asserted user IRQ lines after the most recent tick.
    pub fn irq_lines(&self) -> u32 {
        self.irq_lines
    }

    /// Returns whether a transaction is waiting for its acknowledge.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Presents a request to the slave.
    ///
    /// The access itself happens on the acknowledge cycle, reported by [`Bus::tick`].
    ///
    /// # Errors
    ///
    /// * [`BusError::Busy`] if a transaction is already in flight.
    /// * [`BusError::PoweredDown`] if the user project is unpowered.
    /// * [`BusError::Misaligned`] if `addr` is not word aligned.
    pub fn begin(&mut self, req: WbRequest) -> Result<(), BusError> {
        if let Some(pending) = &self.pending {
            return Err(BusError::Busy {
                pending: pending.req.addr,
            });
        }
        if !self.powered {
            self.stats.errors += 1;
            return Err(BusError::PoweredDown { addr: req.addr });
        }
        if req.addr & 0x3 != 0 {
            self.stats.errors += 1;
            return Err(BusError::Misaligned { addr: req.addr });
        }
        self.pending = Some(Pending {
            req,
            remaining: self.ack_latency,
        });
        Ok(())
    }

    /// Master drops `CYC_O` without waiting for the acknowledge.
    pub fn abort(&mut self) {
        if let Some(pending) = self.pending.take() {
            trace!("wishbone abort at {:#010x}", pending.req.addr);
        }
    }

    /// Advances every device by one clock and progresses the outstanding transaction.
    ///
    /// # Returns
    ///
    /// `Some(result)` on the cycle the transaction terminates: the read data (0 for
    /// writes) on `ACK_I`, or the error on `ERR_I`. `None` otherwise.
    pub fn tick(&mut self) -> Option<Result<u32, BusError>> {
        self.stats.cycles += 1;
        if !self.powered {
            return None;
        }

        let mut irq_lines = 0;
        for dev in &mut self.devices {
            if dev.tick() {
                if let Some(id) = dev.irq_id() {
                    if id < 32 {
                        irq_lines |= 1 << id;
                    }
                }
            }
        }
        self.irq_lines = irq_lines;

        let pending = self.pending.as_mut()?;
        pending.remaining = pending.remaining.saturating_sub(1);
        if pending.remaining > 0 {
            self.stats.wait_cycles += 1;
            return None;
        }
        let req = pending.req;
        self.pending = None;
        Some(self.complete(req))
    }

    fn complete(&mut self, req: WbRequest) -> Result<u32, BusError> {
        let strict = self.strict_decode;
        let result = if let Some((dev, offset)) = self.find_device(req.addr) {
            match req.op {
                WbOp::Read => Ok(dev.read_u32(offset)),
                WbOp::Write(val) => {
                    dev.write_u32(offset, val);
                    Ok(0)
                }
            }
        } else {
            self.stats.unmapped += 1;
            if strict {
                Err(BusError::Unmapped { addr: req.addr })
            } else {
                Ok(0)
            }
        };

        match (&result, req.op) {
            (Err(_), _) => self.stats.errors += 1,
            (Ok(_), WbOp::Read) => self.stats.reads += 1,
            (Ok(_), WbOp::Write(_)) => self.stats.writes += 1,
        }
        trace!("wishbone ack {:#010x} {:?} -> {:?}", req.addr, req.op, result);
        result
    }

    fn find_device(&mut self, addr: u32) -> Option<(&mut Box<dyn Device>, u32)> {
        if let Some(offset) = self
            .devices
            .get(self.last_device_idx)
            .and_then(|d| claim(d.as_ref(), addr))
        {
            return Some((&mut self.devices[self.last_device_idx], offset));
        }

        let (idx, offset) = self.decode(addr)?;
        self.last_device_idx = idx;
        Some((&mut self.devices[idx], offset))
    }

    /// Returns SPI instance `index`, if present.
    pub fn spi_mut(&mut self, index: usize) -> Option<&mut Spi> {
        let name = format!("SPI{index}");
        self.devices
            .iter_mut()
            .filter(|d| d.name() == name)
            .find_map(|d| d.as_spi_mut())
    }

    /// Returns the I3C controller, if present.
    pub fn i3c_mut(&mut self) -> Option<&mut I3c> {
        self.devices.iter_mut().find_map(|d| d.as_i3c_mut())
    }

    /// Returns the GPIO block, if present.
    pub fn gpio_mut(&mut self) -> Option<&mut Gpio> {
        self.devices.iter_mut().find_map(|d| d.as_gpio_mut())
    }
}
