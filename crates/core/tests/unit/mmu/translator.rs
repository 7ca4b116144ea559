//! Translator Tests.
//!
//! Verifies end-to-end translation:
//! - Round trip after `map` for any offset
//! - TLB hit/miss accounting and page-table access counts
//! - Faults at the outer and inner level, without TLB fills
//! - LRU eviction across the 16-entry TLB
//! - Stale translations after a remap until flushed

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use vmsim_core::common::{ConfigError, FaultLevel, PageFault, VirtAddr};
use vmsim_core::config::TranslatorConfig;
use vmsim_core::mmu::Translator;

use crate::common::harness::{page_addr, translator_with};

// ══════════════════════════════════════════════════════════
// 1. Construction
// ══════════════════════════════════════════════════════════

#[test]
fn zero_tlb_rejected() {
    assert!(matches!(
        Translator::with_tlb_entries(0),
        Err(ConfigError::ZeroTlbEntries)
    ));
    let config = TranslatorConfig { tlb_entries: 0 };
    assert!(Translator::from_config(&config).is_err());
}

#[test]
fn new_translator_is_empty() {
    let mmu = Translator::new();
    assert_eq!(mmu.tlb().capacity(), 16);
    assert_eq!(mmu.page_table().inner_tables_allocated(), 0);
    assert_eq!(mmu.stats().lookups(), 0);
}

// ══════════════════════════════════════════════════════════
// 2. Translation
// ══════════════════════════════════════════════════════════

#[test]
fn first_translation_walks_then_hits() {
    let mut mmu = translator_with(&[(0, 100)]);

    let paddr = mmu.translate(VirtAddr::new(0x0000_0000)).unwrap();
    assert_eq!(paddr.val(), 100 << 12);
    assert_eq!(mmu.stats().tlb_misses, 1);
    assert_eq!(mmu.stats().page_table_accesses, 2);

    let paddr = mmu.translate(VirtAddr::new(0x0000_0ABC)).unwrap();
    assert_eq!(paddr.val(), (100 << 12) | 0xABC);
    assert_eq!(mmu.stats().tlb_hits, 1);
    assert_eq!(mmu.stats().page_table_accesses, 2);
}

#[test]
fn unmapped_outer_slot_faults_after_one_level() {
    let mut mmu = Translator::new();
    let err = mmu.translate(VirtAddr::new(0x0040_0000)).unwrap_err();
    assert_eq!(
        err,
        PageFault {
            vaddr: VirtAddr::new(0x0040_0000),
            level: FaultLevel::Outer
        }
    );
    assert_eq!(mmu.stats().page_table_accesses, 1);
    assert_eq!(mmu.stats().tlb_misses, 1);
    assert_eq!(mmu.tlb().occupancy(), 0);
}

#[test]
fn unmapped_inner_entry_faults_after_two_levels() {
    let mut mmu = translator_with(&[(0, 100)]);
    let err = mmu.translate(VirtAddr::new(0x0000_2000)).unwrap_err();
    assert_eq!(err.level, FaultLevel::Inner);
    assert_eq!(mmu.stats().page_table_accesses, 2);
    assert_eq!(mmu.tlb().occupancy(), 0);
}

#[test]
fn repeated_fault_never_fills_tlb() {
    let mut mmu = Translator::new();
    for _ in 0..3 {
        assert!(mmu.translate(VirtAddr::new(0x1234_5678)).is_err());
    }
    assert_eq!(mmu.stats().tlb_misses, 3);
    assert_eq!(mmu.stats().tlb_hits, 0);
    assert_eq!(mmu.tlb().occupancy(), 0);
}

#[test]
fn map_allocates_inner_table_lazily() {
    let mut mmu = Translator::new();
    mmu.map(VirtAddr::new(0x0000_0000), 1);
    mmu.map(VirtAddr::new(0x0000_1000), 2);
    assert_eq!(mmu.page_table().inner_tables_allocated(), 1);
    mmu.map(VirtAddr::new(0x0080_0000), 3);
    assert_eq!(mmu.page_table().inner_tables_allocated(), 2);
    assert!(mmu.page_table().inner_table(1).is_none());
}

#[test]
fn map_does_not_touch_tlb_or_counters() {
    let mut mmu = Translator::new();
    mmu.map(VirtAddr::new(0x0000_0000), 1);
    assert_eq!(mmu.tlb().occupancy(), 0);
    assert_eq!(mmu.stats().page_table_accesses, 0);
}

#[test]
fn demo_sequence_counters() {
    let mut mmu = Translator::new();
    for (va, frame) in [
        (0x0000_0000, 100),
        (0x0000_1000, 101),
        (0x0040_0000, 200),
        (0x0080_0000, 300),
        (0x1000_0000, 400),
    ] {
        mmu.map(VirtAddr::new(va), frame);
    }
    let probes = [
        0x0000_0000,
        0x0000_0ABC,
        0x0000_1000,
        0x0000_1234,
        0x0000_0500,
        0x0040_0000,
        0x0080_0000,
        0x1000_0000,
        0x0000_2000,
        0x0000_1FFF,
    ];
    let faults = probes
        .iter()
        .filter(|&&va| mmu.translate(VirtAddr::new(va)).is_err())
        .count();
    assert_eq!(faults, 1);
    let stats = mmu.stats();
    assert_eq!(stats.tlb_hits, 4);
    assert_eq!(stats.tlb_misses, 6);
    assert_eq!(stats.page_table_accesses, 12);
}

// ══════════════════════════════════════════════════════════
// 3. TLB Replacement Through the Translator
// ══════════════════════════════════════════════════════════

#[test]
fn seventeenth_page_evicts_least_recent() {
    let mappings: Vec<(u32, u32)> = (0..17).map(|vpn| (vpn, 1000 + vpn)).collect();
    let mut mmu = translator_with(&mappings);

    for vpn in 0..16 {
        let _ = mmu.translate(page_addr(vpn)).unwrap();
    }
    assert_eq!(mmu.tlb().occupancy(), 16);

    // Refresh VPN 0 so VPN 1 becomes the oldest.
    let _ = mmu.translate(page_addr(0)).unwrap();
    let _ = mmu.translate(page_addr(16)).unwrap();

    assert_eq!(mmu.tlb().peek(1), None);
    assert_eq!(mmu.tlb().peek(0), Some(1000));
    assert_eq!(mmu.tlb().peek(16), Some(1016));

    let misses = mmu.stats().tlb_misses;
    let _ = mmu.translate(page_addr(1)).unwrap();
    assert_eq!(mmu.stats().tlb_misses, misses + 1);
}

// ══════════════════════════════════════════════════════════
// 4. Remap Staleness
// ══════════════════════════════════════════════════════════

#[test]
fn remap_leaves_stale_tlb_entry() {
    let mut mmu = translator_with(&[(5, 50)]);
    let _ = mmu.translate(page_addr(5)).unwrap();

    mmu.map(page_addr(5), 60);
    let paddr = mmu.translate(page_addr(5)).unwrap();
    assert_eq!(paddr.val(), 50 << 12);

    mmu.flush_tlb();
    let paddr = mmu.translate(page_addr(5)).unwrap();
    assert_eq!(paddr.val(), 60 << 12);
}

// ══════════════════════════════════════════════════════════
// 5. Properties
// ══════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn map_then_translate_roundtrip(
        vpn in 0u32..(1 << 20),
        frame in any::<u32>(),
        offset in 0u32..4096,
    ) {
        let mut mmu = Translator::new();
        mmu.map(page_addr(vpn), frame);
        let va = VirtAddr::new((vpn << 12) | offset);
        let paddr = mmu.translate(va).unwrap();
        prop_assert_eq!(paddr.val(), (u64::from(frame) << 12) | u64::from(offset));
        // Second hit via the TLB returns the same address.
        prop_assert_eq!(mmu.translate(va).unwrap(), paddr);
        prop_assert_eq!(mmu.stats().tlb_hits, 1);
    }

    #[test]
    fn valid_tlb_vpns_stay_unique(vpns in prop::collection::vec(0u32..40, 1..120)) {
        let mappings: Vec<(u32, u32)> = (0..40).map(|v| (v, v + 1)).collect();
        let mut mmu = translator_with(&mappings);
        for &vpn in &vpns {
            let _ = mmu.translate(page_addr(vpn)).unwrap();
        }
        let mut seen: Vec<u32> = mmu
            .tlb()
            .entries()
            .iter()
            .filter(|e| e.valid)
            .map(|e| e.vpn)
            .collect();
        let total = seen.len();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), total);
        prop_assert!(total <= 16);
    }
}
