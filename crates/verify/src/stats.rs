//! Bus traffic statistics.
//!
//! Counts the transactions a testbench served and the clock cycles it ran.
//! The [`Display`](fmt::Display) impl renders the same fixed-width summary the
//! CLI prints after a run.

use std::fmt;

/// Transaction and cycle counters of one testbench.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusStats {
    /// Clock cycles simulated.
    pub cycles: u64,
    /// Acknowledged word reads.
    pub word_reads: u64,
    /// Acknowledged word writes.
    pub word_writes: u64,
    /// Acknowledged byte reads.
    pub byte_reads: u64,
    /// Byte writes issued, synchronous or not.
    pub byte_writes: u64,
    /// Byte writes issued without waiting for the acknowledge.
    pub async_writes: u64,
    /// Transactions that never acknowledged.
    pub timeouts: u64,
    /// Device resets.
    pub resets: u64,
}

impl BusStats {
    /// Transactions issued, including those that timed out.
    pub const fn transactions(&self) -> u64 {
        self.word_reads + self.word_writes + self.byte_reads + self.byte_writes + self.timeouts
    }
}

impl fmt::Display for BusStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "BUS STATISTICS")?;
        writeln!(f, "  sim_cycles             {}", self.cycles)?;
        writeln!(f, "  transactions           {}", self.transactions())?;
        writeln!(f, "  word.reads             {}", self.word_reads)?;
        writeln!(f, "  word.writes            {}", self.word_writes)?;
        writeln!(f, "  byte.reads             {}", self.byte_reads)?;
        writeln!(
            f,
            "  byte.writes            {} ({} async)",
            self.byte_writes, self.async_writes
        )?;
        writeln!(f, "  timeouts               {}", self.timeouts)?;
        writeln!(f, "  resets                 {}", self.resets)?;
        write!(f, "----------------------------------------------------------")
    }
}
