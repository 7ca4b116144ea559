//! Text rendering for simulation records.
//!
//! Column layouts follow the classic simulator output: a step table for the
//! Clock run, a probe table for the translator, and a bit-field breakdown of
//! a single virtual address.

use std::fmt::Write as _;

use super::simulator::{ProbeRecord, StepRecord};
use crate::common::VirtAddr;
use crate::replacement::FrameSnapshot;

/// Header for [`format_step`] lines.
pub fn step_header() -> String {
    let (step, page, op, frames) = ("Step", "Page", "Operation", "Frames");
    format!("{step:<6} {page:<6} {op:<10} {frames}")
}

/// One verbose step line: step, page, operation, HIT/FAULT and the frame table.
pub fn format_step(record: &StepRecord, snapshot: &FrameSnapshot<'_>) -> String {
    let status = if record.outcome.is_hit() {
        "HIT  "
    } else {
        "FAULT"
    };
    format!(
        "{:<6} {:<6} {:<10} {} {}",
        record.step,
        record.reference.page,
        record.reference.access.to_string(),
        status,
        snapshot
    )
}

/// Header for [`format_probe`] lines.
pub fn probe_header() -> String {
    let (virt, phys, status, tlb) = ("Virtual", "Physical", "Status", "TLB");
    format!("{virt:<12} {phys:<12} {status:<12} {tlb:<10}")
}

/// One probe line: virtual, physical (or `PAGE FAULT`), status, TLB hit/miss.
pub fn format_probe(record: &ProbeRecord) -> String {
    match record.result {
        Ok(paddr) => format!(
            "{:<12} {:<12} {:<12} {:<10}",
            record.vaddr.to_string(),
            paddr.to_string(),
            "SUCCESS",
            if record.tlb_hit { "HIT" } else { "MISS" }
        ),
        Err(_) => format!(
            "{:<12} {:<12} {:<12} {:<10}",
            record.vaddr.to_string(),
            "PAGE FAULT",
            "FAULT",
            "MISS"
        ),
    }
}

/// Multi-line breakdown of an address into outer index, inner index and offset.
pub fn format_breakdown(vaddr: VirtAddr) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Virtual Address: {vaddr}");
    let _ = writeln!(out, "  Outer Index: {} (bits 31-22)", vaddr.outer_index());
    let _ = writeln!(out, "  Inner Index: {} (bits 21-12)", vaddr.inner_index());
    let _ = writeln!(out, "  Offset: 0x{:03X} (bits 11-0)", vaddr.page_offset());
    let _ = write!(out, "  VPN: 0x{:05X}", vaddr.vpn());
    out
}
