//! Bus transaction statistics.
//!
//! Tracks what the Wishbone interconnect has seen since power-up:
//! 1. **Clock:** Total cycles ticked and cycles spent waiting for acknowledges.
//! 2. **Traffic:** Completed reads and writes.
//! 3. **Decode:** Accesses that hit no peripheral window, and accesses answered with an error.

use serde::Serialize;

/// Counters maintained by [`Bus`](crate::soc::interconnect::Bus).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BusStats {
    /// Clock cycles ticked.
    pub cycles: u64,
    /// Cycles a transaction spent waiting between strobe and acknowledge.
    pub wait_cycles: u64,
    /// Completed read transactions.
    pub reads: u64,
    /// Completed write transactions.
    pub writes: u64,
    /// Accesses that decoded to no peripheral.
    pub unmapped: u64,
    /// Transactions terminated with an error.
    pub errors: u64,
}

impl BusStats {
    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "cycles={} reads={} writes={} wait={} unmapped={} errors={}",
            self.cycles, self.reads, self.writes, self.wait_cycles, self.unmapped, self.errors
        )
    }
}
