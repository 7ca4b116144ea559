//! Address-layout and capacity constants.
//!
//! The 32-bit virtual address layout is fixed:
//! 1. **Outer index:** bits 31-22 (10 bits), selects an inner table.
//! 2. **Inner index:** bits 21-12 (10 bits), selects a PTE within it.
//! 3. **Page offset:** bits 11-0 (12 bits), byte within a 4 KiB page.

/// Page size in bytes (4KB).
pub const PAGE_SIZE: u32 = 4096;

/// Number of bits to shift to convert between bytes and pages.
pub const PAGE_SHIFT: u32 = 12;

/// Mask for extracting the page offset from an address.
pub const PAGE_OFFSET_MASK: u32 = PAGE_SIZE - 1;

/// Width of the outer page-table index in bits.
pub const OUTER_INDEX_BITS: u32 = 10;

/// Width of the inner page-table index in bits.
pub const INNER_INDEX_BITS: u32 = 10;

/// Shift that brings the outer index down to bit 0.
pub const OUTER_INDEX_SHIFT: u32 = INNER_INDEX_BITS + PAGE_SHIFT;

/// Mask selecting the outer index bits (31-22) of a virtual address.
pub const OUTER_INDEX_MASK: u32 = 0xFFC0_0000;

/// Mask selecting the inner index bits (21-12) of a virtual address.
pub const INNER_INDEX_MASK: u32 = 0x003F_F000;

/// Mask for a 20-bit virtual page number.
pub const VPN_MASK: u32 = 0x000F_FFFF;

/// Number of slots in the outer table.
pub const OUTER_TABLE_ENTRIES: usize = 1 << OUTER_INDEX_BITS;

/// Number of PTEs in each inner table.
pub const INNER_TABLE_ENTRIES: usize = 1 << INNER_INDEX_BITS;

/// Frame-table capacity. Configuration may lower the bound but never raise it.
pub const MAX_FRAMES: usize = 100;
