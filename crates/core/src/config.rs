//! Configuration system for the virtual-memory simulators.
//!
//! This module defines the configuration structures used to parameterize both
//! engines. It provides:
//! 1. **Defaults:** Baseline capacities for frames, TLB entries and the trace limit.
//! 2. **Structures:** `ClockConfig` for the replacement manager, `TranslatorConfig` for the MMU.
//! 3. **Validation:** Explicit bounds checks; a bad capacity is a [`ConfigError`], never a panic.
//!
//! Configuration is read from JSON (every field optional) or built with `Config::default()`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::ConfigError;
use crate::common::constants::MAX_FRAMES;

/// Default configuration constants for the simulators.
mod defaults {
    /// Frames in the replacement manager when none are requested.
    pub const FRAMES: usize = 4;

    /// Reference events read from a trace file before the reader stops.
    pub const MAX_REFERENCES: usize = 10_000;

    /// Translation Lookaside Buffer entry count.
    pub const TLB_ENTRIES: usize = 16;
}

/// Clock replacement manager settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClockConfig {
    /// Number of physical frames.
    #[serde(default = "ClockConfig::default_frames")]
    pub frames: usize,

    /// Largest frame count accepted by validation, at most [`MAX_FRAMES`].
    #[serde(default = "ClockConfig::default_max_frames")]
    pub max_frames: usize,

    /// Maximum number of events read from a reference file.
    #[serde(default = "ClockConfig::default_max_references")]
    pub max_references: usize,
}

impl ClockConfig {
    const fn default_frames() -> usize {
        defaults::FRAMES
    }

    const fn default_max_frames() -> usize {
        MAX_FRAMES
    }

    const fn default_max_references() -> usize {
        defaults::MAX_REFERENCES
    }

    /// Checks the frame bound, the frame count and the trace limit.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::FrameBoundTooLarge`] if `max_frames` exceeds [`MAX_FRAMES`].
    /// - [`ConfigError::ZeroFrames`] or [`ConfigError::TooManyFrames`] if `frames`
    ///   is outside `1..=max_frames`.
    /// - [`ConfigError::ZeroReferenceLimit`] if `max_references` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_frames > MAX_FRAMES {
            return Err(ConfigError::FrameBoundTooLarge {
                requested: self.max_frames,
                capacity: MAX_FRAMES,
            });
        }
        if self.frames == 0 {
            return Err(ConfigError::ZeroFrames);
        }
        if self.frames > self.max_frames {
            return Err(ConfigError::TooManyFrames {
                requested: self.frames,
                max: self.max_frames,
            });
        }
        if self.max_references == 0 {
            return Err(ConfigError::ZeroReferenceLimit);
        }
        Ok(())
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            frames: defaults::FRAMES,
            max_frames: MAX_FRAMES,
            max_references: defaults::MAX_REFERENCES,
        }
    }
}

/// Address translator settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranslatorConfig {
    /// Number of fully-associative TLB entries.
    #[serde(default = "TranslatorConfig::default_tlb_entries")]
    pub tlb_entries: usize,
}

impl TranslatorConfig {
    const fn default_tlb_entries() -> usize {
        defaults::TLB_ENTRIES
    }

    /// Rejects an empty TLB.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroTlbEntries`] if `tlb_entries` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tlb_entries == 0 {
            return Err(ConfigError::ZeroTlbEntries);
        }
        Ok(())
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            tlb_entries: defaults::TLB_ENTRIES,
        }
    }
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use vmsim_core::config::Config;
///
/// let config = Config::from_json(r#"{ "clock": { "frames": 8 } }"#).unwrap();
/// assert_eq!(config.clock.frames, 8);
/// assert_eq!(config.clock.max_frames, 100);
/// assert_eq!(config.translator.tlb_entries, 16);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Replacement manager configuration
    #[serde(default)]
    pub clock: ClockConfig,
    /// Address translator configuration
    #[serde(default)]
    pub translator: TranslatorConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] if the document is not valid JSON for `Config`,
    /// otherwise any error from [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise any error from
    /// [`Config::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// The first error reported by [`ClockConfig::validate`] or
    /// [`TranslatorConfig::validate`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.clock.validate()?;
        self.translator.validate()
    }
}
