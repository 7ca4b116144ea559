//! Error and fault definitions.
//!
//! This module defines the failure modes of the simulators. It provides:
//! 1. **Configuration errors:** Rejected capacities and unreadable config files; fatal at setup.
//! 2. **Page faults:** The expected "no mapping" outcome of a translation; counted, never fatal.
//! 3. **Trace errors:** Unreadable reference-string files; recoverable by the harness.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::addr::VirtAddr;

/// Invalid simulator configuration.
///
/// Returned by every constructor that accepts a capacity, and by config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A replacement manager needs at least one frame.
    #[error("frame count must be at least 1")]
    ZeroFrames,

    /// More frames were requested than the frame table can hold.
    #[error("frame count {requested} exceeds the maximum of {max}")]
    TooManyFrames {
        /// Frames asked for.
        requested: usize,
        /// Configured upper bound.
        max: usize,
    },

    /// The configured frame bound is larger than the frame table can ever hold.
    #[error("frame bound {requested} exceeds the capacity of {capacity}")]
    FrameBoundTooLarge {
        /// Bound asked for.
        requested: usize,
        /// Fixed capacity.
        capacity: usize,
    },

    /// A TLB needs at least one entry.
    #[error("TLB must have at least 1 entry")]
    ZeroTlbEntries,

    /// The reference-string read limit must allow at least one event.
    #[error("reference limit must be at least 1")]
    ZeroReferenceLimit,

    /// The configuration document is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("could not read configuration file {}: {source}", path.display())]
    Io {
        /// File that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Table level at which a walk found no mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaultLevel {
    /// The outer slot has no inner table.
    Outer,
    /// The inner table exists but the PTE is not present.
    Inner,
}

/// A translation found no valid mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("page fault at {vaddr} ({level:?} table)")]
pub struct PageFault {
    /// Address whose translation failed.
    pub vaddr: VirtAddr,
    /// Level of the walk that missed.
    pub level: FaultLevel,
}

/// A reference-string file could not be loaded.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The file could not be opened or read.
    #[error("could not open reference file {}: {source}", path.display())]
    Io {
        /// File that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
