//! Simulation statistics collection and reporting.
//!
//! This module tracks the counters both engines maintain. It provides:
//! 1. **Replacement counters:** Accesses, page faults, replacements and write-backs.
//! 2. **Translation counters:** TLB hits/misses and page-table level accesses.
//! 3. **Derived metrics:** Fault rate and TLB hit rate, as percentages.
//!
//! The engines only increment counters; rendering happens through `Display`
//! so callers decide where the text goes.

use std::fmt;

/// Horizontal rule framing each statistics block.
const RULE: &str = "==========================================================";

/// Counters maintained by the Clock replacement manager.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClockStats {
    /// Calls to `access`, hits and faults alike.
    pub accesses: u64,
    /// Accesses whose page was not resident.
    pub page_faults: u64,
    /// Faults that had to evict a resident page.
    pub page_replacements: u64,
    /// Evictions of dirty pages (simulated write-backs).
    pub disk_writes: u64,
}

impl ClockStats {
    /// Accesses that found their page resident.
    pub const fn hits(&self) -> u64 {
        self.accesses - self.page_faults
    }

    /// Page faults as a percentage of accesses; `0.0` before the first access.
    pub fn fault_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            (self.page_faults as f64 / self.accesses as f64) * 100.0
        }
    }

    /// Prints the statistics block to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for ClockStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "CLOCK REPLACEMENT STATISTICS")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "accesses                 {}", self.accesses)?;
        writeln!(f, "page_faults              {}", self.page_faults)?;
        writeln!(f, "page_replacements        {}", self.page_replacements)?;
        writeln!(f, "disk_writes              {}", self.disk_writes)?;
        if self.accesses > 0 {
            writeln!(f, "fault_rate               {:.2}%", self.fault_rate())?;
        }
        write!(f, "{RULE}")
    }
}

/// Counters maintained by the address translator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TranslationStats {
    /// Translations served from the TLB.
    pub tlb_hits: u64,
    /// Translations that had to walk the page table.
    pub tlb_misses: u64,
    /// Page-table levels inspected, one per level per walk.
    pub page_table_accesses: u64,
}

impl TranslationStats {
    /// Total TLB lookups.
    pub const fn lookups(&self) -> u64 {
        self.tlb_hits + self.tlb_misses
    }

    /// TLB hits as a percentage of lookups; `0.0` before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.lookups();
        if total == 0 {
            0.0
        } else {
            (self.tlb_hits as f64 / total as f64) * 100.0
        }
    }

    /// Prints the statistics block to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for TranslationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "TRANSLATION STATISTICS")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "tlb.hits                 {}", self.tlb_hits)?;
        writeln!(f, "tlb.misses               {}", self.tlb_misses)?;
        if self.lookups() > 0 {
            writeln!(f, "tlb.hit_rate             {:.2}%", self.hit_rate())?;
        }
        writeln!(f, "page_table.accesses      {}", self.page_table_accesses)?;
        write!(f, "{RULE}")
    }
}
