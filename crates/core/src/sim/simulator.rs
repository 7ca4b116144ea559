//! Simulation drivers.
//!
//! Each driver pushes events into an engine one at a time. Nothing here
//! changes engine behaviour; observers and records expose per-event outcomes
//! to the reporting layer.

use tracing::info;

use super::trace::Reference;
use crate::common::{FrameNumber, PageFault, PhysAddr, VirtAddr};
use crate::mmu::Translator;
use crate::replacement::{AccessOutcome, PageReplacer};

/// Outcome of one reference-string step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepRecord {
    /// 1-based position in the reference string.
    pub step: usize,
    /// The event applied.
    pub reference: Reference,
    /// What the replacement manager did with it.
    pub outcome: AccessOutcome,
}

/// Outcome of translating one probe address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeRecord {
    /// Address translated.
    pub vaddr: VirtAddr,
    /// Physical address, or the fault.
    pub result: Result<PhysAddr, PageFault>,
    /// The translation was served by the TLB.
    pub tlb_hit: bool,
}

/// Mappings installed by the demo translation run.
const DEFAULT_MAPPINGS: [(u32, FrameNumber); 5] = [
    (0x0000_0000, 100),
    (0x0000_1000, 101),
    (0x0040_0000, 200),
    (0x0080_0000, 300),
    (0x1000_0000, 400),
];

/// Addresses probed by the demo translation run.
const DEFAULT_PROBES: [u32; 10] = [
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

/// Built-in `(address, frame)` mappings for the translation demo.
pub fn default_mappings() -> Vec<(VirtAddr, FrameNumber)> {
    DEFAULT_MAPPINGS
        .iter()
        .map(|&(va, frame)| (VirtAddr::new(va), frame))
        .collect()
}

/// Built-in probe addresses for the translation demo.
pub fn default_probes() -> Vec<VirtAddr> {
    DEFAULT_PROBES.iter().copied().map(VirtAddr::new).collect()
}

/// Feeds every reference to `replacer`, calling `observe` after each step.
///
/// The observer sees the replacer in its post-access state, which is what a
/// verbose trace prints.
pub fn run_clock<R, F>(replacer: &mut R, references: &[Reference], mut observe: F)
where
    R: PageReplacer + ?Sized,
    F: FnMut(&StepRecord, &R),
{
    for (i, &reference) in references.iter().enumerate() {
        let outcome = replacer.access(reference.page, reference.access);
        let record = StepRecord {
            step: i + 1,
            reference,
            outcome,
        };
        observe(&record, &*replacer);
    }
    let stats = replacer.stats();
    info!(
        accesses = stats.accesses,
        faults = stats.page_faults,
        replacements = stats.page_replacements,
        disk_writes = stats.disk_writes,
        "reference string complete"
    );
}

/// Installs `mappings`, then translates each probe in order.
///
/// TLB hit/miss per probe is derived from the hit counter before and after
/// the call.
pub fn run_translations(
    translator: &mut Translator,
    mappings: &[(VirtAddr, FrameNumber)],
    probes: &[VirtAddr],
) -> Vec<ProbeRecord> {
    for &(vaddr, frame) in mappings {
        translator.map(vaddr, frame);
    }
    probes
        .iter()
        .map(|&vaddr| {
            let hits_before = translator.stats().tlb_hits;
            let result = translator.translate(vaddr);
            ProbeRecord {
                vaddr,
                result,
                tlb_hit: translator.stats().tlb_hits > hits_before,
            }
        })
        .collect()
}
