//! # Configuration Tests
//!
//! Defaults, partial JSON documents, file loading and validation bounds.

use std::io::Write;

use pretty_assertions::assert_eq;
use vmsim_core::common::ConfigError;
use vmsim_core::config::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.clock.frames, 4);
    assert_eq!(config.clock.max_frames, 100);
    assert_eq!(config.clock.max_references, 10_000);
    assert_eq!(config.translator.tlb_entries, 16);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_json_uses_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_section() {
    let config = Config::from_json(r#"{ "translator": { "tlb_entries": 4 } }"#).unwrap();
    assert_eq!(config.translator.tlb_entries, 4);
    assert_eq!(config.clock, ClockConfig::default());
}

#[test]
fn test_zero_frames_rejected() {
    let err = Config::from_json(r#"{ "clock": { "frames": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroFrames));
}

#[test]
fn test_frames_above_bound_rejected() {
    let err = Config::from_json(r#"{ "clock": { "frames": 101 } }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::TooManyFrames {
            requested: 101,
            max: 100
        }
    ));
}

#[test]
fn test_lowered_bound_rejects_more_frames() {
    let json = r#"{ "clock": { "frames": 9, "max_frames": 8 } }"#;
    let err = Config::from_json(json).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::TooManyFrames {
            requested: 9,
            max: 8
        }
    ));
}

#[test]
fn test_bound_cannot_exceed_frame_table_capacity() {
    let json = r#"{ "clock": { "frames": 5000, "max_frames": 100000 } }"#;
    let err = Config::from_json(json).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::FrameBoundTooLarge {
            requested: 100_000,
            capacity: 100
        }
    ));
}

#[test]
fn test_frames_at_bound_accepted() {
    let clock = ClockConfig {
        frames: 100,
        ..ClockConfig::default()
    };
    assert!(clock.validate().is_ok());
}

#[test]
fn test_zero_tlb_rejected() {
    let err = Config::from_json(r#"{ "translator": { "tlb_entries": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroTlbEntries));
}

#[test]
fn test_zero_reference_limit_rejected() {
    let err = Config::from_json(r#"{ "clock": { "max_references": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroReferenceLimit));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let err = Config::from_json(r#"{ "clock": { "frames": "four" } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "clock": {{ "frames": 3 }} }}"#).unwrap();
    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.clock.frames, 3);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
