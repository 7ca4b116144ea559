//! Memory Management Unit (MMU).
//!
//! This module implements virtual-to-physical address translation over a
//! two-level page table, fronted by a fully-associative TLB.
//!
//! `map` writes only the page table. A TLB entry cached for a VPN before it is
//! remapped keeps returning the old frame until LRU pushes it out or
//! [`Translator::flush_tlb`] is called; no shootdown is modelled.

/// Two-level page table (outer table of lazily allocated inner tables).
pub mod page_table;

/// Translation Lookaside Buffer with LRU replacement.
pub mod tlb;

use tracing::{debug, trace};

use crate::common::{ConfigError, FaultLevel, FrameNumber, PageFault, PhysAddr, VirtAddr};
use crate::config::TranslatorConfig;
use crate::stats::TranslationStats;

use self::page_table::{PageTable, Walk};
use self::tlb::Tlb;

/// Address translator owning a page table and a TLB.
///
/// # Examples
///
/// ```
/// use vmsim_core::common::VirtAddr;
/// use vmsim_core::mmu::Translator;
///
/// let mut mmu = Translator::new();
/// mmu.map(VirtAddr::new(0x0040_0000), 200);
/// let paddr = mmu.translate(VirtAddr::new(0x0040_0ABC)).unwrap();
/// assert_eq!(paddr.val(), (200 << 12) | 0xABC);
/// assert!(mmu.translate(VirtAddr::new(0x0000_2000)).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Translator {
    page_table: PageTable,
    tlb: Tlb,
    stats: TranslationStats,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    /// Creates a translator with an empty page table and a 16-entry TLB.
    pub fn new() -> Self {
        Self {
            page_table: PageTable::new(),
            tlb: Tlb::default(),
            stats: TranslationStats::default(),
        }
    }

    /// Creates a translator with a TLB of `tlb_entries` slots.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroTlbEntries`] if `tlb_entries` is zero.
    pub fn with_tlb_entries(tlb_entries: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            page_table: PageTable::new(),
            tlb: Tlb::new(tlb_entries)?,
            stats: TranslationStats::default(),
        })
    }

    /// Creates a translator from a configuration section.
    ///
    /// # Errors
    ///
    /// Any error from [`TranslatorConfig::validate`].
    pub fn from_config(config: &TranslatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::with_tlb_entries(config.tlb_entries)
    }

    /// Translates a virtual address to a physical address.
    ///
    /// Consults the TLB first; on a miss walks the page table, counting one
    /// page-table access per level inspected, and caches a successful walk.
    ///
    /// # Errors
    ///
    /// [`PageFault`] if the outer slot has no inner table or the PTE is not
    /// present. A fault leaves the TLB unchanged.
    pub fn translate(&mut self, vaddr: VirtAddr) -> Result<PhysAddr, PageFault> {
        let vpn = vaddr.vpn();
        let offset = vaddr.page_offset();

        if let Some(frame) = self.tlb.lookup(vpn) {
            self.stats.tlb_hits += 1;
            trace!(%vaddr, vpn, frame, "tlb hit");
            return Ok(PhysAddr::from_frame(frame, offset));
        }
        self.stats.tlb_misses += 1;

        let walk = self
            .page_table
            .walk(vaddr.outer_index(), vaddr.inner_index());
        self.stats.page_table_accesses += walk.levels();

        let frame = match walk {
            Walk::Mapped(frame) => frame,
            Walk::NoInnerTable => return Err(Self::fault(vaddr, FaultLevel::Outer)),
            Walk::NotPresent => return Err(Self::fault(vaddr, FaultLevel::Inner)),
        };

        let slot = self.tlb.insert(vpn, frame);
        trace!(%vaddr, vpn, frame, slot, "tlb fill");
        Ok(PhysAddr::from_frame(frame, offset))
    }

    fn fault(vaddr: VirtAddr, level: FaultLevel) -> PageFault {
        debug!(%vaddr, ?level, "page fault");
        PageFault { vaddr, level }
    }

    /// Maps the page containing `vaddr` to `frame_number`.
    ///
    /// Allocates the inner table if needed and overwrites any previous PTE.
    /// The TLB is not consulted or invalidated.
    pub fn map(&mut self, vaddr: VirtAddr, frame_number: FrameNumber) {
        self.page_table
            .set(vaddr.outer_index(), vaddr.inner_index(), frame_number);
        debug!(%vaddr, vpn = vaddr.vpn(), frame_number, "map");
    }

    /// Invalidates every TLB entry.
    pub fn flush_tlb(&mut self) {
        self.tlb.flush();
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &TranslationStats {
        &self.stats
    }

    /// The page table.
    pub const fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    /// The TLB.
    pub const fn tlb(&self) -> &Tlb {
        &self.tlb
    }
}
