//! Common types shared by both simulators.
//!
//! This module provides the building blocks used across the crate:
//! 1. **Address Types:** Strong types for virtual and physical addresses.
//! 2. **Constants:** The fixed two-level address layout.
//! 3. **Memory Access:** Read/write classification of reference events.
//! 4. **Error Handling:** Configuration errors, page faults and trace errors.

/// Address type definitions (physical and virtual addresses).
pub mod addr;

/// Address-layout constants.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types and fault definitions.
pub mod error;

pub use addr::{FrameNumber, PhysAddr, VirtAddr};
pub use constants::{PAGE_SHIFT, PAGE_SIZE, VPN_MASK};
pub use data::AccessType;
pub use error::{ConfigError, FaultLevel, PageFault, TraceError};
