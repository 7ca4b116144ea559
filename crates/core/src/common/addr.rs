//! Physical and Virtual Address types.
//!
//! This module defines strong types for physical and virtual addresses to prevent
//! accidental mixing of address spaces. Virtual addresses are 32 bits wide and
//! decompose into outer index, inner index and page offset; physical addresses
//! are 64 bits wide so that `frame << 12 | offset` never truncates.

use std::fmt;

use super::constants::{
    INNER_INDEX_MASK, OUTER_INDEX_MASK, OUTER_INDEX_SHIFT, PAGE_OFFSET_MASK, PAGE_SHIFT, VPN_MASK,
};

/// Physical frame number.
pub type FrameNumber = u32;

/// A 32-bit virtual address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtAddr(pub u32);

/// A physical address produced by translation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u64);

impl VirtAddr {
    /// Creates a new virtual address from a raw 32-bit value.
    ///
    /// # Arguments
    ///
    /// * `addr` - The raw 32-bit address value.
    ///
    /// # Returns
    ///
    /// A new `VirtAddr` instance wrapping the provided address.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Builds an address from its three components.
    ///
    /// Each component is masked to its field width, so out-of-range values wrap
    /// rather than bleed into neighbouring fields.
    ///
    /// # Arguments
    ///
    /// * `outer` - Outer-table index (bits 31-22).
    /// * `inner` - Inner-table index (bits 21-12).
    /// * `offset` - Byte offset within the page (bits 11-0).
    pub const fn from_parts(outer: usize, inner: usize, offset: u32) -> Self {
        let outer = ((outer as u32) << OUTER_INDEX_SHIFT) & OUTER_INDEX_MASK;
        let inner = ((inner as u32) << PAGE_SHIFT) & INNER_INDEX_MASK;
        Self(outer | inner | (offset & PAGE_OFFSET_MASK))
    }

    /// Returns the raw 32-bit address value.
    ///
    /// # Returns
    ///
    /// The underlying `u32` value of the virtual address.
    #[inline(always)]
    pub const fn val(&self) -> u32 {
        self.0
    }

    /// Index into the outer table (bits 31-22).
    #[inline]
    pub const fn outer_index(&self) -> usize {
        ((self.0 & OUTER_INDEX_MASK) >> OUTER_INDEX_SHIFT) as usize
    }

    /// Index into an inner table (bits 21-12).
    #[inline]
    pub const fn inner_index(&self) -> usize {
        ((self.0 & INNER_INDEX_MASK) >> PAGE_SHIFT) as usize
    }

    /// Byte offset within the 4 KiB page (bits 11-0).
    #[inline]
    pub const fn page_offset(&self) -> u32 {
        self.0 & PAGE_OFFSET_MASK
    }

    /// Virtual page number: outer and inner index concatenated (20 bits).
    #[inline]
    pub const fn vpn(&self) -> u32 {
        (self.0 >> PAGE_SHIFT) & VPN_MASK
    }
}

impl From<u32> for VirtAddr {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}

impl fmt::Display for VirtAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl PhysAddr {
    /// Creates a new physical address from a raw 64-bit value.
    ///
    /// # Arguments
    ///
    /// * `addr` - The raw 64-bit address value.
    ///
    /// # Returns
    ///
    /// A new `PhysAddr` instance wrapping the provided address.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Combines a frame number with a page offset.
    ///
    /// # Arguments
    ///
    /// * `frame` - Physical frame number.
    /// * `offset` - Byte offset within the page; bits above 11 are ignored.
    ///
    /// # Returns
    ///
    /// `(frame << 12) | offset` as a `PhysAddr`.
    #[inline]
    pub const fn from_frame(frame: FrameNumber, offset: u32) -> Self {
        let base = (frame as u64) << PAGE_SHIFT;
        Self(base | (offset & PAGE_OFFSET_MASK) as u64)
    }

    /// Returns the raw 64-bit address value.
    ///
    /// # Returns
    ///
    /// The underlying `u64` value of the physical address.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}
