//! Page Replacement Policies.
//!
//! Decides which resident page leaves physical memory when a faulting page
//! needs a frame.
//!
//! # Policies
//!
//! - `Clock`: Second-chance sweep over a circular frame table.

/// Clock (second-chance) replacement.
pub mod clock;

pub use clock::{ClockReplacer, Frame, FrameSnapshot};

use crate::common::AccessType;
use crate::stats::ClockStats;

/// Identifier of a virtual page in a reference string.
pub type PageId = u32;

/// A page pushed out of its frame to make room for another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eviction {
    /// Page that was resident.
    pub page: PageId,
    /// Whether it was modified; a dirty eviction costs one disk write.
    pub dirty: bool,
}

/// Result of a single page access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum AccessOutcome {
    /// The page was already resident.
    Hit {
        /// Frame holding the page.
        frame: usize,
    },
    /// The page was loaded into `frame`, possibly evicting another.
    Fault {
        /// Frame the page now occupies.
        frame: usize,
        /// Previous occupant, `None` when an empty frame was used.
        evicted: Option<Eviction>,
    },
}

impl AccessOutcome {
    /// Returns `true` for [`AccessOutcome::Hit`].
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    /// Returns `true` for [`AccessOutcome::Fault`].
    pub const fn is_fault(&self) -> bool {
        !self.is_hit()
    }

    /// Frame that holds the page after the access.
    pub const fn frame(&self) -> usize {
        match self {
            Self::Hit { frame } | Self::Fault { frame, .. } => *frame,
        }
    }
}

/// Interface of a page replacement manager driven by a reference string.
pub trait PageReplacer {
    /// Touches `page`, loading it (and evicting as needed) if it is not resident.
    fn access(&mut self, page: PageId, access: AccessType) -> AccessOutcome;

    /// Counters accumulated so far.
    fn stats(&self) -> &ClockStats;

    /// Current frame contents for tracing.
    fn snapshot(&self) -> FrameSnapshot<'_>;
}
