//! Translation Lookaside Buffer (TLB).
//!
//! A small fully-associative cache mapping Virtual Page Numbers (VPN) to
//! frame numbers. Entries are stamped from a logical clock on every hit and
//! fill; when full, the entry with the smallest stamp is replaced (true LRU,
//! ties to the lowest slot). The clock is a counter, not wall time.

use tracing::debug;

use crate::common::{ConfigError, FrameNumber};

/// A single entry in the TLB.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TlbEntry {
    /// Entry validity flag.
    pub valid: bool,
    /// Virtual Page Number (tag).
    pub vpn: u32,
    /// Frame number (data).
    pub frame_number: FrameNumber,
    /// Logical time of the last hit or fill.
    pub last_access_time: u64,
}

/// Translation Lookaside Buffer structure.
#[derive(Clone, Debug)]
pub struct Tlb {
    entries: Vec<TlbEntry>,
    access_counter: u64,
}

impl Default for Tlb {
    fn default() -> Self {
        Self {
            entries: vec![TlbEntry::default(); Self::DEFAULT_ENTRIES],
            access_counter: 0,
        }
    }
}

impl Tlb {
    /// Default number of entries.
    pub const DEFAULT_ENTRIES: usize = 16;

    /// Creates an empty TLB with `size` entries.
    ///
    /// # Arguments
    ///
    /// * `size` - Number of fully-associative slots.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroTlbEntries`] if `size` is zero.
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::ZeroTlbEntries);
        }
        Ok(Self {
            entries: vec![TlbEntry::default(); size],
            access_counter: 0,
        })
    }

    /// Number of slots.
    pub const fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// All slots, valid or not, in slot order.
    pub const fn entries(&self) -> &[TlbEntry] {
        self.entries.as_slice()
    }

    /// Number of valid entries.
    pub fn occupancy(&self) -> usize {
        self.entries.iter().filter(|e| e.valid).count()
    }

    /// Current value of the logical clock.
    pub const fn access_counter(&self) -> u64 {
        self.access_counter
    }

    const fn tick(&mut self) -> u64 {
        self.access_counter += 1;
        self.access_counter
    }

    /// Looks up a VPN, refreshing its stamp on a hit.
    ///
    /// # Arguments
    ///
    /// * `vpn` - The virtual page number to look up.
    ///
    /// # Returns
    ///
    /// The cached frame number, or `None` on a miss. A miss changes nothing.
    pub fn lookup(&mut self, vpn: u32) -> Option<FrameNumber> {
        let idx = self.entries.iter().position(|e| e.valid && e.vpn == vpn)?;
        let now = self.tick();
        let entry = &mut self.entries[idx];
        entry.last_access_time = now;
        Some(entry.frame_number)
    }

    /// Returns the frame for a VPN without touching LRU state.
    pub fn peek(&self, vpn: u32) -> Option<FrameNumber> {
        self.entries
            .iter()
            .find(|e| e.valid && e.vpn == vpn)
            .map(|e| e.frame_number)
    }

    /// Slot the next fill would use: first invalid entry, else least recently used.
    fn fill_slot(&self) -> usize {
        if let Some(idx) = self.entries.iter().position(|e| !e.valid) {
            return idx;
        }
        let mut victim = 0;
        for (i, e) in self.entries.iter().enumerate().skip(1) {
            if e.last_access_time < self.entries[victim].last_access_time {
                victim = i;
            }
        }
        victim
    }

    /// Inserts a translation.
    ///
    /// A VPN that is already cached is updated in place so valid VPNs stay unique.
    ///
    /// # Arguments
    ///
    /// * `vpn` - Virtual page number (tag).
    /// * `frame_number` - Frame the page maps to.
    ///
    /// # Returns
    ///
    /// The slot index that now holds the entry.
    pub fn insert(&mut self, vpn: u32, frame_number: FrameNumber) -> usize {
        let idx = self
            .entries
            .iter()
            .position(|e| e.valid && e.vpn == vpn)
            .unwrap_or_else(|| self.fill_slot());
        let previous = self.entries[idx];
        if previous.valid && previous.vpn != vpn {
            debug!(slot = idx, old_vpn = previous.vpn, vpn, "tlb evict");
        }
        let now = self.tick();
        self.entries[idx] = TlbEntry {
            valid: true,
            vpn,
            frame_number,
            last_access_time: now,
        };
        idx
    }

    /// Invalidates every entry. The logical clock keeps running.
    pub fn flush(&mut self) {
        for e in &mut self.entries {
            e.valid = false;
        }
    }
}
