//! SPI master.
//!
//! A byte-oriented SPI master with RX/TX FIFOs. Each instance occupies a
//! 1 KiB window; the user project instantiates four of them.
//!
//! # Registers
//!
//! * `0x00`: RXDATA (read pops the RX FIFO, 0 when empty)
//! * `0x04`: TXDATA (write pushes the TX FIFO, dropped when full)
//! * `0x08`: CFG (bit 0 CPOL, bit 1 CPHA)
//! * `0x0C`: CTRL (bit 0 GO, bit 1 BSY, bit 2 NEG)
//! * `0x10`: PR (16-bit clock prescaler)
//! * `0x14`: STATUS (TIP, IF, RXNE, TXE, RXFULL, TXEMPTY)
//! * `0x18`..`0x2C`: FIFO level, threshold and flush registers
//! * `0xFF00`..`0xFF0C`: IM, MIS, RIS, IC (bit 0: transfer complete)

use std::collections::VecDeque;

use crate::common::constants::{
    SPI_CFG, SPI_CFG_MASK, SPI_CTRL, SPI_CTRL_BSY, SPI_CTRL_GO, SPI_CTRL_NEG, SPI_PR,
    SPI_RX_FIFO_FLUSH, SPI_RX_FIFO_LEVEL, SPI_RX_FIFO_THRESHOLD, SPI_RXDATA, SPI_STATUS,
    SPI_STATUS_IF, SPI_STATUS_RXFULL, SPI_STATUS_RXNE, SPI_STATUS_TIP, SPI_STATUS_TXE,
    SPI_STATUS_TXEMPTY, SPI_TX_FIFO_FLUSH, SPI_TX_FIFO_LEVEL, SPI_TX_FIFO_THRESHOLD, SPI_TXDATA,
    SPI_IRQ_DONE, SPI_WINDOW,
};
use crate::soc::devices::{Device, IrqBlock};

/// Writable bits of the FIFO threshold registers.
const THRESHOLD_MASK: u32 = 0xF;
/// Writable bits of the prescaler register.
const PR_MASK: u32 = 0xFFFF;
/// System clocks per SPI bit for a prescaler of zero (two half periods).
const CLOCKS_PER_BIT: u64 = 2;

/// Byte currently being shifted out.
#[derive(Debug, Clone, Copy)]
struct Transfer {
    byte: u8,
    remaining: u64,
}

/// SPI master device.
#[derive(Debug)]
pub struct Spi {
    name: String,
    index: u32,
    base_addr: u32,
    cfg: u32,
    neg: bool,
    prescaler: u32,
    rx_fifo: VecDeque<u8>,
    tx_fifo: VecDeque<u8>,
    fifo_depth: usize,
    rx_threshold: u32,
    tx_threshold: u32,
    transfer: Option<Transfer>,
    irq_flag: bool,
    irq: IrqBlock,
    /// MOSI is wired back to MISO on the board.
    loopback: bool,
    /// Byte presented on MISO by the external device when not looped back.
    miso_byte: u8,
}

impl Spi {
    /// Creates SPI instance `index` at `base_addr`.
    ///
    /// # Arguments
    ///
    /// * `index` - Instance number; also the IRQ line.
    /// * `base_addr` - Wishbone base address of the 1 KiB window.
    /// * `fifo_depth` - Depth of the RX and TX FIFOs.
    /// * `loopback` - Whether MOSI is wired to MISO.
    pub fn new(index: u32, base_addr: u32, fifo_depth: usize, loopback: bool) -> Self {
        Self {
            name: format!("SPI{index}"),
            index,
            base_addr,
            cfg: 0,
            neg: false,
            prescaler: 0,
            rx_fifo: VecDeque::with_capacity(fifo_depth),
            tx_fifo: VecDeque::with_capacity(fifo_depth),
            fifo_depth,
            rx_threshold: 0,
            tx_threshold: 0,
            transfer: None,
            irq_flag: false,
            irq: IrqBlock::new(SPI_IRQ_DONE),
            loopback,
            miso_byte: 0,
        }
    }

    /// Sets the byte the external device shifts in on MISO.
    pub fn set_miso_byte(&mut self, byte: u8) {
        self.miso_byte = byte;
    }

    /// Returns `true` while a byte is being shifted.
    pub fn is_busy(&self) -> bool {
        self.transfer.is_some()
    }

    /// Current prescaler value.
    pub fn prescaler(&self) -> u32 {
        self.prescaler
    }

    /// Current CPOL/CPHA configuration bits.
    pub fn config(&self) -> u32 {
        self.cfg
    }

    /// Number of system clocks needed to shift one byte at the current prescaler.
    pub fn transfer_cycles(&self) -> u64 {
        8 * CLOCKS_PER_BIT * (u64::from(self.prescaler) + 1)
    }

    fn ctrl(&self) -> u32 {
        let mut ctrl = 0;
        if self.is_busy() {
            ctrl |= SPI_CTRL_BSY;
        }
        if self.neg {
            ctrl |= SPI_CTRL_NEG;
        }
        ctrl
    }

    fn status(&mut self) -> u32 {
        let mut status = 0;
        if self.is_busy() {
            status |= SPI_STATUS_TIP;
        }
        if self.irq_flag {
            status |= SPI_STATUS_IF;
        }
        if !self.rx_fifo.is_empty() {
            status |= SPI_STATUS_RXNE;
        }
        if self.tx_fifo.len() < self.fifo_depth {
            status |= SPI_STATUS_TXE;
        }
        if self.rx_fifo.len() >= self.fifo_depth {
            status |= SPI_STATUS_RXFULL;
        }
        if self.tx_fifo.is_empty() {
            status |= SPI_STATUS_TXEMPTY;
        }
        self.irq_flag = false;
        status
    }

    fn start(&mut self) {
        if self.is_busy() {
            return;
        }
        if let Some(byte) = self.tx_fifo.pop_front() {
            self.transfer = Some(Transfer {
                byte,
                remaining: self.transfer_cycles(),
            });
        }
    }
}

impl Device for Spi {
    fn name(&self) -> &str {
        &self.name
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, SPI_WINDOW)
    }

    fn read_u32(&mut self, offset: u32) -> u32 {
        if let Some(value) = self.irq.read(offset) {
            return value;
        }
        match offset {
            SPI_RXDATA => self.rx_fifo.pop_front().map_or(0, u32::from),
            SPI_CFG => self.cfg,
            SPI_CTRL => self.ctrl(),
            SPI_PR => self.prescaler,
            SPI_STATUS => self.status(),
            SPI_RX_FIFO_LEVEL => self.rx_fifo.len() as u32,
            SPI_RX_FIFO_THRESHOLD => self.rx_threshold,
            SPI_TX_FIFO_LEVEL => self.tx_fifo.len() as u32,
            SPI_TX_FIFO_THRESHOLD => self.tx_threshold,
            _ => 0,
        }
    }

    fn write_u32(&mut self, offset: u32, val: u32) {
        if self.irq.write(offset, val) {
            return;
        }
        match offset {
            SPI_TXDATA => {
                if self.tx_fifo.len() < self.fifo_depth {
                    self.tx_fifo.push_back(val as u8);
                }
            }
            SPI_CFG => self.cfg = val & SPI_CFG_MASK,
            SPI_CTRL => {
                self.neg = val & SPI_CTRL_NEG != 0;
                if val & SPI_CTRL_GO != 0 {
                    self.start();
                }
            }
            SPI_PR => self.prescaler = val & PR_MASK,
            SPI_RX_FIFO_THRESHOLD => self.rx_threshold = val & THRESHOLD_MASK,
            SPI_RX_FIFO_FLUSH => {
                if val & 1 != 0 {
                    self.rx_fifo.clear();
                }
            }
            SPI_TX_FIFO_THRESHOLD => self.tx_threshold = val & THRESHOLD_MASK,
            SPI_TX_FIFO_FLUSH => {
                if val & 1 != 0 {
                    self.tx_fifo.clear();
                }
            }
            _ => {}
        }
    }

    fn reset(&mut self) {
        self.cfg = 0;
        self.neg = false;
        self.prescaler = 0;
        self.rx_fifo.clear();
        self.tx_fifo.clear();
        self.rx_threshold = 0;
        self.tx_threshold = 0;
        self.transfer = None;
        self.irq_flag = false;
        self.irq.reset();
    }

    /// Shifts the current byte; on the last clock the received byte lands in the RX FIFO
    /// and the transfer-complete interrupt is latched.
    fn tick(&mut self) -> bool {
        if let Some(transfer) = self.transfer.as_mut() {
            transfer.remaining = transfer.remaining.saturating_sub(1);
            if transfer.remaining == 0 {
                let sent = transfer.byte;
                self.transfer = None;
                let received = if self.loopback { sent } else { self.miso_byte };
                if self.rx_fifo.len() < self.fifo_depth {
                    self.rx_fifo.push_back(received);
                }
                self.irq_flag = true;
                self.irq.raise(SPI_IRQ_DONE);
            }
        }
        self.irq.pending()
    }

    fn irq_id(&self) -> Option<u32> {
        Some(self.index)
    }

    fn has_irq_block(&self) -> bool {
        true
    }

    fn as_spi_mut(&mut self) -> Option<&mut Spi> {
        Some(self)
    }
}
