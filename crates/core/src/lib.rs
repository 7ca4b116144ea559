//! Virtual-memory management simulators.
//!
//! This crate models two cooperating pieces of an operating system's memory
//! manager as deterministic, in-process engines driven by memory accesses:
//! 1. **Replacement:** Clock (second-chance) page replacement over a fixed frame table.
//! 2. **Translation:** Two-level page table with a fully-associative LRU TLB.
//! 3. **Harness:** Reference-string input, drivers, configuration and statistics.
//!
//! The engines never print; they update counters and return outcomes that the
//! harness renders.

/// Common types (addresses, access kinds, errors, layout constants).
pub mod common;
/// Simulator configuration (defaults, validation, JSON loading).
pub mod config;
/// Address translator (page table, TLB).
pub mod mmu;
/// Page replacement (Clock).
pub mod replacement;
/// Reference-string harness, drivers and report formatting.
pub mod sim;
/// Statistics counters and derived rates.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Address translator; construct with `Translator::new`.
pub use crate::mmu::Translator;
/// Clock replacement manager; construct with `ClockReplacer::new`.
pub use crate::replacement::{ClockReplacer, PageReplacer};
