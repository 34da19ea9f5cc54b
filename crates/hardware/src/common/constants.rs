//! User-project register map.
//!
//! This module defines the memory map seen from the Caravel management core's
//! Wishbone master. It includes:
//! 1. **Base Addresses:** One fixed window per peripheral instance.
//! 2. **Register Offsets:** Window-relative offsets for SPI, I3C and GPIO registers.
//! 3. **Bit Fields:** Control, configuration and status bits.
//! 4. **Interrupt Block:** IM/MIS/RIS/IC registers shared by every peripheral.
//! 5. **Pad Layout:** Which Caravel I/O pads each peripheral drives.

/// Start of the user-project Wishbone address space.
pub const USER_BASE: u32 = 0x3000_0000;

/// Base address of SPI master instance 0.
pub const SPI0_BASE: u32 = 0x3000_0000;
/// Base address of SPI master instance 1.
pub const SPI1_BASE: u32 = 0x3000_0400;
/// Base address of SPI master instance 2.
pub const SPI2_BASE: u32 = 0x3000_0800;
/// Base address of SPI master instance 3.
pub const SPI3_BASE: u32 = 0x3000_0C00;
/// Base address of the I3C controller.
pub const I3C_BASE: u32 = 0x3000_1000;
/// Base address of the GPIO block.
pub const GPIO_BASE: u32 = 0x3000_2000;

/// First address past every decoded peripheral window; reads here return 0.
pub const UNMAPPED_ADDR: u32 = 0x3000_3000;

/// Size of one SPI window in bytes.
pub const SPI_WINDOW: u32 = 0x400;
/// Size of the I3C window in bytes.
pub const I3C_WINDOW: u32 = 0x1000;
/// Size of the GPIO window in bytes.
pub const GPIO_WINDOW: u32 = 0x1000;

/// Number of SPI master instances in the user project.
pub const SPI_INSTANCES: usize = 4;

/// Wishbone base address of each SPI instance, indexed by instance.
pub const SPI_BASES: [u32; SPI_INSTANCES] = [SPI0_BASE, SPI1_BASE, SPI2_BASE, SPI3_BASE];

/// Every peripheral register window as `(name, base, size)`, in address order.
pub const PERIPHERAL_WINDOWS: [(&str, u32, u32); 6] = [
    ("SPI0", SPI0_BASE, SPI_WINDOW),
    ("SPI1", SPI1_BASE, SPI_WINDOW),
    ("SPI2", SPI2_BASE, SPI_WINDOW),
    ("SPI3", SPI3_BASE, SPI_WINDOW),
    ("I3C", I3C_BASE, I3C_WINDOW),
    ("GPIO", GPIO_BASE, GPIO_WINDOW),
];

/// Offset of the interrupt block from a peripheral's base address.
///
/// The block lies past the end of every register window and is decoded separately.
pub const IRQ_BLOCK_OFFSET: u32 = 0xFF00;
/// Size of the interrupt block in bytes.
pub const IRQ_BLOCK_SIZE: u32 = 0x10;
/// Interrupt mask (1 = source enabled).
pub const IRQ_IM: u32 = IRQ_BLOCK_OFFSET;
/// Masked interrupt status, `RIS & IM` (read-only).
pub const IRQ_MIS: u32 = IRQ_BLOCK_OFFSET + 0x04;
/// Raw interrupt status, latched until cleared (read-only).
pub const IRQ_RIS: u32 = IRQ_BLOCK_OFFSET + 0x08;
/// Interrupt clear (write 1 to clear the matching RIS bit).
pub const IRQ_IC: u32 = IRQ_BLOCK_OFFSET + 0x0C;

/// Interrupt source: SPI transfer complete.
pub const SPI_IRQ_DONE: u32 = 1 << 0;
/// Interrupt source: I3C command complete.
pub const I3C_IRQ_DONE: u32 = 1 << 0;
/// Interrupt source: I3C write not acknowledged.
pub const I3C_IRQ_NACK: u32 = 1 << 1;

/// User IRQ line of the I3C controller; SPI instance `n` drives line `n`.
pub const I3C_IRQ_LINE: u32 = 4;
/// User IRQ line of the GPIO block.
pub const GPIO_IRQ_LINE: u32 = 5;

/// SPI receive data register (read pops the RX FIFO).
pub const SPI_RXDATA: u32 = 0x00;
/// SPI transmit data register (write pushes the TX FIFO).
pub const SPI_TXDATA: u32 = 0x04;
/// SPI configuration register (CPOL/CPHA).
pub const SPI_CFG: u32 = 0x08;
/// SPI control register (GO/BSY/NEG).
pub const SPI_CTRL: u32 = 0x0C;
/// SPI clock prescaler register.
pub const SPI_PR: u32 = 0x10;
/// SPI status register.
pub const SPI_STATUS: u32 = 0x14;
/// SPI RX FIFO fill level.
pub const SPI_RX_FIFO_LEVEL: u32 = 0x18;
/// SPI RX FIFO threshold.
pub const SPI_RX_FIFO_THRESHOLD: u32 = 0x1C;
/// SPI RX FIFO flush strobe.
pub const SPI_RX_FIFO_FLUSH: u32 = 0x20;
/// SPI TX FIFO fill level.
pub const SPI_TX_FIFO_LEVEL: u32 = 0x24;
/// SPI TX FIFO threshold.
pub const SPI_TX_FIFO_THRESHOLD: u32 = 0x28;
/// SPI TX FIFO flush strobe.
pub const SPI_TX_FIFO_FLUSH: u32 = 0x2C;

/// SPI CTRL: start a transfer (self-clearing).
pub const SPI_CTRL_GO: u32 = 1 << 0;
/// SPI CTRL: transfer in progress (read-only).
pub const SPI_CTRL_BSY: u32 = 1 << 1;
/// SPI CTRL: sample MISO on the negative edge.
pub const SPI_CTRL_NEG: u32 = 1 << 2;

/// SPI CFG: clock polarity.
pub const SPI_CFG_CPOL: u32 = 1 << 0;
/// SPI CFG: clock phase.
pub const SPI_CFG_CPHA: u32 = 1 << 1;
/// SPI CFG: writable bits.
pub const SPI_CFG_MASK: u32 = SPI_CFG_CPOL | SPI_CFG_CPHA;

/// SPI STATUS: transfer in progress.
pub const SPI_STATUS_TIP: u32 = 1 << 0;
/// SPI STATUS: transfer-complete interrupt flag.
pub const SPI_STATUS_IF: u32 = 1 << 1;
/// SPI STATUS: RX FIFO not empty.
pub const SPI_STATUS_RXNE: u32 = 1 << 2;
/// SPI STATUS: TX FIFO has space.
pub const SPI_STATUS_TXE: u32 = 1 << 3;
/// SPI STATUS: RX FIFO full.
pub const SPI_STATUS_RXFULL: u32 = 1 << 4;
/// SPI STATUS: TX FIFO empty.
pub const SPI_STATUS_TXEMPTY: u32 = 1 << 5;

/// I3C clock prescaler register.
pub const I3C_PRESCALE: u32 = 0x00;
/// I3C control register.
pub const I3C_CTRL: u32 = 0x04;
/// I3C data register.
pub const I3C_DATA: u32 = 0x08;
/// I3C command register.
pub const I3C_CMD: u32 = 0x0C;
/// I3C status register.
pub const I3C_STATUS: u32 = 0x10;

/// I3C CTRL: core enable.
pub const I3C_CTRL_EN: u32 = 1 << 0;
/// I3C CTRL: interrupt enable.
pub const I3C_CTRL_IEN: u32 = 1 << 1;

/// I3C CMD: generate START.
pub const I3C_CMD_START: u32 = 1 << 0;
/// I3C CMD: generate STOP.
pub const I3C_CMD_STOP: u32 = 1 << 1;
/// I3C CMD: read one byte.
pub const I3C_CMD_READ: u32 = 1 << 2;
/// I3C CMD: write one byte.
pub const I3C_CMD_WRITE: u32 = 1 << 3;

/// I3C STATUS: command in progress.
pub const I3C_STATUS_TIP: u32 = 1 << 0;
/// I3C STATUS: command-complete interrupt flag.
pub const I3C_STATUS_IF: u32 = 1 << 1;
/// I3C STATUS: last written byte was not acknowledged.
pub const I3C_STATUS_NACK: u32 = 1 << 2;

/// GPIO input data register.
pub const GPIO_DATAI: u32 = 0x00;
/// GPIO output data register.
pub const GPIO_DATAO: u32 = 0x04;
/// GPIO direction register (1 = output).
pub const GPIO_DIR: u32 = 0x08;

/// GPIO direction value: input.
pub const GPIO_DIR_INPUT: u8 = 0;
/// GPIO direction value: output.
pub const GPIO_DIR_OUTPUT: u8 = 1;

/// Number of Caravel I/O pads.
pub const PAD_COUNT: usize = 38;
/// First pad used by the SPI masters (four pads per instance).
pub const SPI_PAD_FIRST: usize = 8;
/// Last pad used by the SPI masters.
pub const SPI_PAD_LAST: usize = 23;
/// MISO pad of each SPI instance.
pub const SPI_MISO_PADS: [usize; SPI_INSTANCES] = [9, 13, 17, 21];
/// I3C SCL and SDA pads.
pub const I3C_PADS: [usize; 2] = [24, 25];
/// GPIO pads.
pub const GPIO_PADS: [usize; 2] = [26, 27];
