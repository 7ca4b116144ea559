//! Reference-string harness and simulation drivers.
//!
//! This module feeds the engines and observes them. It provides:
//! 1. **Trace input:** Parsing and loading `<op> <page>` reference strings, with a built-in default.
//! 2. **Drivers:** Loops that push one event at a time into an engine and record the outcome.
//! 3. **Reporting:** Text rendering of per-step, per-probe and address-breakdown lines.

/// Text rendering of simulation records.
pub mod report;

/// Drivers for the replacement manager and the translator.
pub mod simulator;

/// Reference-string parsing and loading.
pub mod trace;

pub use simulator::{ProbeRecord, StepRecord, run_clock, run_translations};
pub use trace::{ParsedTrace, Reference, ReferenceSource, default_references};
