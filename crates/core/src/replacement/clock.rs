//! Clock (Second-Chance) Replacement Policy.
//!
//! Frames form a circular table swept by a persistent "clock hand". A page
//! whose reference bit is set when the hand reaches it has the bit cleared and
//! is passed over once; the first frame found with a clear bit is the victim.
//! The hand is left one past the victim for the next sweep.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `access()` hit: O(F) linear residency scan
//!   - victim selection: at most two full sweeps, O(F)
//! - **Space Complexity:** O(F) where F is the number of frames

use std::fmt;

use tracing::{debug, trace};

use super::{AccessOutcome, Eviction, PageId, PageReplacer};
use crate::common::constants;
use crate::common::{AccessType, ConfigError};
use crate::config::ClockConfig;
use crate::stats::ClockStats;

/// A physical frame slot in the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    /// Resident page, `None` while the frame has never been filled.
    pub occupant: Option<PageId>,
    /// Set on every access; cleared when the hand passes over the frame.
    pub reference_bit: bool,
    /// Set by writes; triggers a write-back when the page is evicted.
    pub dirty_bit: bool,
}

impl Frame {
    /// Returns `true` if no page has been loaded into this frame.
    pub const fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(page) = self.occupant else {
            return f.write_str(" - ");
        };
        write!(f, "{page:2}")?;
        if self.reference_bit {
            f.write_str("R")?;
        }
        if self.dirty_bit {
            f.write_str("D")?;
        }
        Ok(())
    }
}

/// Borrowed view of the frame table and hand position.
///
/// Renders as `[ 1R* |  2RD  |  -   ]`, with `*` after the frame under the hand.
#[derive(Clone, Copy, Debug)]
pub struct FrameSnapshot<'a> {
    /// Frames in table order.
    pub frames: &'a [Frame],
    /// Index of the frame under the clock hand.
    pub hand: usize,
}

impl fmt::Display for FrameSnapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "{frame}")?;
            f.write_str(if i == self.hand { "* " } else { "  " })?;
            if i + 1 < self.frames.len() {
                f.write_str("| ")?;
            }
        }
        f.write_str("]")
    }
}

/// Clock replacement manager over a fixed-size frame table.
///
/// # Examples
///
/// ```
/// use vmsim_core::common::AccessType;
/// use vmsim_core::replacement::{ClockReplacer, PageReplacer};
///
/// let mut clock = ClockReplacer::new(2).unwrap();
/// assert!(clock.access(7, AccessType::Read).is_fault());
/// assert!(clock.access(7, AccessType::Write).is_hit());
/// assert_eq!(clock.stats().page_faults, 1);
/// ```
#[derive(Clone, Debug)]
pub struct ClockReplacer {
    frames: Vec<Frame>,
    hand: usize,
    stats: ClockStats,
}

impl ClockReplacer {
    /// Largest frame table accepted by [`ClockReplacer::new`].
    pub const MAX_FRAMES: usize = constants::MAX_FRAMES;

    /// Creates a manager with `num_frames` empty frames, bounded by [`Self::MAX_FRAMES`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroFrames`] or [`ConfigError::TooManyFrames`].
    pub fn new(num_frames: usize) -> Result<Self, ConfigError> {
        Self::with_capacity(num_frames, Self::MAX_FRAMES)
    }

    /// Creates a manager with `num_frames` empty frames and a custom upper bound.
    ///
    /// # Arguments
    ///
    /// * `num_frames` - Frames in the table.
    /// * `max_frames` - Largest accepted table; values above [`Self::MAX_FRAMES`]
    ///   are clamped to it.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroFrames`] if `num_frames` is zero, or
    /// [`ConfigError::TooManyFrames`] if it exceeds the effective bound.
    pub fn with_capacity(num_frames: usize, max_frames: usize) -> Result<Self, ConfigError> {
        let max_frames = max_frames.min(Self::MAX_FRAMES);
        if num_frames == 0 {
            return Err(ConfigError::ZeroFrames);
        }
        if num_frames > max_frames {
            return Err(ConfigError::TooManyFrames {
                requested: num_frames,
                max: max_frames,
            });
        }
        debug!(frames = num_frames, "clock replacer initialised");
        Ok(Self {
            frames: vec![Frame::default(); num_frames],
            hand: 0,
            stats: ClockStats::default(),
        })
    }

    /// Creates a manager from a validated configuration section.
    ///
    /// # Errors
    ///
    /// Any error from [`ClockConfig::validate`].
    pub fn from_config(config: &ClockConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::with_capacity(config.frames, config.max_frames)
    }

    /// Number of frames in the table.
    pub const fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Frames in table order.
    pub const fn frames(&self) -> &[Frame] {
        self.frames.as_slice()
    }

    /// Index of the frame currently under the clock hand.
    pub const fn clock_hand(&self) -> usize {
        self.hand
    }

    /// Frame holding `page`, if it is resident.
    pub fn resident(&self, page: PageId) -> Option<usize> {
        self.frames.iter().position(|f| f.occupant == Some(page))
    }

    fn find_empty(&self) -> Option<usize> {
        self.frames.iter().position(Frame::is_empty)
    }

    const fn advance_hand(&mut self) {
        self.hand = (self.hand + 1) % self.frames.len();
    }

    /// Sweeps from the hand, clearing reference bits, until a frame with a
    /// clear bit is found. Leaves the hand one past the victim.
    fn select_victim(&mut self) -> usize {
        loop {
            let frame = &mut self.frames[self.hand];
            if !frame.reference_bit {
                let victim = self.hand;
                self.advance_hand();
                return victim;
            }
            frame.reference_bit = false;
            trace!(frame = self.hand, "second chance");
            self.advance_hand();
        }
    }
}

impl PageReplacer for ClockReplacer {
    fn access(&mut self, page: PageId, access: AccessType) -> AccessOutcome {
        self.stats.accesses += 1;

        if let Some(idx) = self.resident(page) {
            let frame = &mut self.frames[idx];
            frame.reference_bit = true;
            if access.is_write() {
                frame.dirty_bit = true;
            }
            trace!(page, frame = idx, "hit");
            return AccessOutcome::Hit { frame: idx };
        }

        self.stats.page_faults += 1;

        let (idx, evicted) = match self.find_empty() {
            Some(idx) => (idx, None),
            None => {
                let idx = self.select_victim();
                let victim = self.frames[idx];
                if victim.dirty_bit {
                    self.stats.disk_writes += 1;
                }
                self.stats.page_replacements += 1;
                let evicted = victim.occupant.map(|old| Eviction {
                    page: old,
                    dirty: victim.dirty_bit,
                });
                debug!(
                    page,
                    frame = idx,
                    victim = ?victim.occupant,
                    write_back = victim.dirty_bit,
                    "evict"
                );
                (idx, evicted)
            }
        };

        self.frames[idx] = Frame {
            occupant: Some(page),
            reference_bit: true,
            dirty_bit: access.is_write(),
        };
        debug!(page, frame = idx, "page fault");
        AccessOutcome::Fault {
            frame: idx,
            evicted,
        }
    }

    fn stats(&self) -> &ClockStats {
        &self.stats
    }

    fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            frames: &self.frames,
            hand: self.hand,
        }
    }
}
