//! Reference-string parsing tests.
//!
//! Verifies best-effort parsing: mixed-case ops, glued page numbers, early
//! termination on malformed input, the read limit, and the file fallback.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use rstest::rstest;
use vmsim_core::common::TraceError;
use vmsim_core::sim::trace::{
    Reference, ReferenceSource, default_references, load_references, parse_references,
    references_or_default,
};

// ══════════════════════════════════════════════════════════
// 1. Parsing
// ══════════════════════════════════════════════════════════

#[test]
fn parses_pairs_across_lines() {
    let parsed = parse_references("R 1\nW 2\nr 3\nw 4\n", 100);
    assert_eq!(
        parsed.references,
        vec![
            Reference::read(1),
            Reference::write(2),
            Reference::read(3),
            Reference::write(4)
        ]
    );
    assert!(!parsed.truncated);
}

#[test]
fn op_may_be_glued_to_page() {
    let parsed = parse_references("W12 R 7", 100);
    assert_eq!(
        parsed.references,
        vec![Reference::write(12), Reference::read(7)]
    );
}

#[rstest]
#[case("R 1 X 2 R 3", 1)]
#[case("R 1 W two R 3", 1)]
#[case("R 1 R -4", 1)]
#[case("R 1 W", 1)]
#[case("5 R 1", 0)]
fn malformed_pair_truncates(#[case] input: &str, #[case] kept: usize) {
    let parsed = parse_references(input, 100);
    assert_eq!(parsed.references.len(), kept);
    assert!(parsed.truncated);
}

#[test]
fn empty_input_is_empty_not_truncated() {
    let parsed = parse_references("  \n\t ", 100);
    assert!(parsed.references.is_empty());
    assert!(!parsed.truncated);
}

#[test]
fn limit_caps_the_read() {
    let parsed = parse_references("R 1 R 2 R 3 R 4", 2);
    let expected = vec![Reference::read(1), Reference::read(2)];
    assert_eq!(parsed.references, expected);
    assert!(!parsed.truncated);
}

#[test]
fn default_sequence_has_twenty_two_events() {
    let refs = default_references();
    assert_eq!(refs.len(), 22);
    assert_eq!(refs[0], Reference::read(1));
    assert_eq!(refs[2], Reference::write(3));
    assert_eq!(refs[21], Reference::read(1));
}

// ══════════════════════════════════════════════════════════
// 2. Files
// ══════════════════════════════════════════════════════════

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("refs.txt");
    fs::write(&path, "R 1\nW 2\nR 1\n").unwrap();
    let parsed = load_references(&path, 100).unwrap();
    assert_eq!(parsed.references.len(), 3);
}

#[test]
fn load_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_references(dir.path().join("nope.txt"), 100).unwrap_err();
    assert!(matches!(err, TraceError::Io { .. }));
}

#[test]
fn fallback_without_path_uses_default() {
    let (refs, source, err) = references_or_default(None, 100);
    assert_eq!(refs, default_references());
    assert_eq!(source, ReferenceSource::Default);
    assert!(err.is_none());
}

#[test]
fn fallback_on_unreadable_file_reports_error() {
    let (refs, source, err) = references_or_default(Some(Path::new("/nonexistent/refs.txt")), 100);
    assert_eq!(refs.len(), 22);
    assert_eq!(source, ReferenceSource::Default);
    assert!(err.is_some());
}

#[test]
fn readable_file_keeps_partial_parse() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("refs.txt");
    fs::write(&path, "R 1\nW 2\nbogus\nR 3\n").unwrap();
    let (refs, source, err) = references_or_default(Some(path.as_path()), 100);
    assert_eq!(refs, vec![Reference::read(1), Reference::write(2)]);
    assert_eq!(source, ReferenceSource::File(path.clone()));
    assert!(err.is_none());
}
