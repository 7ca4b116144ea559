//! Two-level hierarchical page table.
//!
//! The outer table has one slot per outer index; each slot either holds an
//! owned inner table of [`INNER_TABLE_ENTRIES`] PTEs or nothing. Inner tables
//! are allocated on the first `map` into their outer slot and never freed
//! while the table lives.

use tracing::debug;

use crate::common::FrameNumber;
use crate::common::constants::{INNER_TABLE_ENTRIES, OUTER_TABLE_ENTRIES};

/// A single page table entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageTableEntry {
    /// The entry maps a frame.
    pub present: bool,
    /// Physical frame backing the page.
    pub frame_number: FrameNumber,
    /// Page modified since mapping.
    pub dirty: bool,
    /// Page referenced since mapping.
    pub referenced: bool,
}

impl PageTableEntry {
    /// A present, clean, referenced entry for `frame_number`.
    pub const fn mapped(frame_number: FrameNumber) -> Self {
        Self {
            present: true,
            frame_number,
            dirty: false,
            referenced: true,
        }
    }
}

/// Second-level table: a fixed block of PTEs.
#[derive(Clone, Debug)]
pub struct InnerTable {
    entries: Box<[PageTableEntry]>,
}

impl InnerTable {
    fn new() -> Self {
        Self {
            entries: vec![PageTableEntry::default(); INNER_TABLE_ENTRIES].into_boxed_slice(),
        }
    }

    /// Entry at `index`, or `None` past the end of the table.
    pub fn entry(&self, index: usize) -> Option<&PageTableEntry> {
        self.entries.get(index)
    }

    /// Number of present entries.
    pub fn present_count(&self) -> usize {
        self.entries.iter().filter(|e| e.present).count()
    }
}

/// Result of walking the two levels for one address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Walk {
    /// The outer slot holds no inner table. One level inspected.
    NoInnerTable,
    /// The inner table exists but the PTE is not present. Two levels inspected.
    NotPresent,
    /// The PTE is present. Two levels inspected.
    Mapped(FrameNumber),
}

impl Walk {
    /// Number of table levels the walk touched.
    pub const fn levels(&self) -> u64 {
        match self {
            Self::NoInnerTable => 1,
            Self::NotPresent | Self::Mapped(_) => 2,
        }
    }
}

/// Outer table owning lazily-allocated inner tables.
#[derive(Clone, Debug)]
pub struct PageTable {
    outer: Vec<Option<InnerTable>>,
}

impl Default for PageTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PageTable {
    /// Creates an outer table with every slot empty.
    pub fn new() -> Self {
        Self {
            outer: vec![None; OUTER_TABLE_ENTRIES],
        }
    }

    /// Walks `[outer][inner]` without side effects.
    pub fn walk(&self, outer: usize, inner: usize) -> Walk {
        self.inner_table(outer).map_or(Walk::NoInnerTable, |table| {
            table
                .entry(inner)
                .filter(|pte| pte.present)
                .map_or(Walk::NotPresent, |pte| Walk::Mapped(pte.frame_number))
        })
    }

    /// Entry at `[outer][inner]` if its inner table exists.
    pub fn lookup(&self, outer: usize, inner: usize) -> Option<&PageTableEntry> {
        self.inner_table(outer)?.entry(inner)
    }

    /// Inner table for `outer`, if allocated.
    pub fn inner_table(&self, outer: usize) -> Option<&InnerTable> {
        self.outer.get(outer)?.as_ref()
    }

    /// Installs a present mapping, allocating the inner table on first use.
    ///
    /// Indices are reduced modulo the table widths, which is a no-op for
    /// indices produced by [`VirtAddr`](crate::common::VirtAddr).
    pub fn set(&mut self, outer: usize, inner: usize, frame_number: FrameNumber) {
        let outer = outer % OUTER_TABLE_ENTRIES;
        let inner = inner % INNER_TABLE_ENTRIES;
        let table = self.outer[outer].get_or_insert_with(|| {
            debug!(outer, "allocate inner table");
            InnerTable::new()
        });
        table.entries[inner] = PageTableEntry::mapped(frame_number);
    }

    /// Number of outer slots holding an inner table.
    pub fn inner_tables_allocated(&self) -> usize {
        self.outer.iter().filter(|slot| slot.is_some()).count()
    }
}
