//! Reference-string input.
//!
//! A reference string is a sequence of whitespace-separated `<op> <page>`
//! pairs, where `op` is `R`/`r` (read) or `W`/`w` (write) and `page` is a
//! non-negative integer. The op letter may be glued to the page (`W7`).
//! Reading is best-effort: the first malformed or truncated pair ends the
//! sequence and everything parsed before it is kept.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::common::{AccessType, TraceError};
use crate::replacement::PageId;

/// Built-in reference string used when no file is given or it cannot be read.
const DEFAULT_PAGES: [PageId; 22] = [
    1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5, 6, 7, 8, 9, 7, 8, 9, 2, 3, 1,
];

/// Write flags matching [`DEFAULT_PAGES`] position for position.
const DEFAULT_WRITES: [bool; 22] = [
    false, false, true, false, false, true, false, false, false, true, false, false, false, true,
    false, false, false, true, false, false, true, false,
];

/// One memory access event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reference {
    /// Page touched.
    pub page: PageId,
    /// Read or write.
    pub access: AccessType,
}

impl Reference {
    /// A read of `page`.
    pub const fn read(page: PageId) -> Self {
        Self {
            page,
            access: AccessType::Read,
        }
    }

    /// A write of `page`.
    pub const fn write(page: PageId) -> Self {
        Self {
            page,
            access: AccessType::Write,
        }
    }
}

/// Outcome of parsing a reference string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedTrace {
    /// Events read, in order.
    pub references: Vec<Reference>,
    /// Parsing stopped at a malformed or truncated pair before the end of input.
    pub truncated: bool,
}

/// Where the references of a run came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReferenceSource {
    /// Loaded from this file.
    File(PathBuf),
    /// The built-in sequence.
    Default,
}

/// The built-in 22-event reference string.
pub fn default_references() -> Vec<Reference> {
    DEFAULT_PAGES
        .iter()
        .zip(DEFAULT_WRITES)
        .map(|(&page, write)| Reference {
            page,
            access: AccessType::from(write),
        })
        .collect()
}

/// Splits an op token into its access type and any page digits glued to it.
fn split_op(token: &str) -> Option<(AccessType, &str)> {
    let mut chars = token.chars();
    let access = AccessType::from_op(chars.next()?)?;
    Some((access, chars.as_str()))
}

/// Parses up to `limit` references from `input`.
///
/// # Examples
///
/// ```
/// use vmsim_core::sim::trace::{Reference, parse_references};
///
/// let parsed = parse_references("R 1 w 2 W3 R x R 4", 100);
/// assert_eq!(
///     parsed.references,
///     vec![Reference::read(1), Reference::write(2), Reference::write(3)]
/// );
/// assert!(parsed.truncated);
/// ```
pub fn parse_references(input: &str, limit: usize) -> ParsedTrace {
    let mut references = Vec::new();
    let mut tokens = input.split_whitespace();

    while references.len() < limit {
        let Some(token) = tokens.next() else {
            return ParsedTrace {
                references,
                truncated: false,
            };
        };
        let reference = split_op(token).and_then(|(access, glued)| {
            let digits = if glued.is_empty() {
                tokens.next()?
            } else {
                glued
            };
            digits
                .parse::<PageId>()
                .ok()
                .map(|page| Reference { page, access })
        });
        let Some(reference) = reference else {
            debug!(parsed = references.len(), token, "malformed reference");
            return ParsedTrace {
                references,
                truncated: true,
            };
        };
        references.push(reference);
    }

    ParsedTrace {
        references,
        truncated: false,
    }
}

/// Reads a reference file and parses up to `limit` events.
///
/// # Errors
///
/// [`TraceError::Io`] if the file cannot be read. Malformed content is not an
/// error; see [`ParsedTrace::truncated`].
pub fn load_references(path: impl AsRef<Path>, limit: usize) -> Result<ParsedTrace, TraceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse_references(&text, limit);
    if parsed.truncated {
        warn!(
            path = %path.display(),
            parsed = parsed.references.len(),
            "reference file truncated at malformed entry"
        );
    }
    Ok(parsed)
}

/// Loads `path` if given, falling back to [`default_references`] when it is
/// absent or unreadable.
///
/// The load error, if any, is returned alongside so the caller can report it.
pub fn references_or_default(
    path: Option<&Path>,
    limit: usize,
) -> (Vec<Reference>, ReferenceSource, Option<TraceError>) {
    let Some(path) = path else {
        return (default_references(), ReferenceSource::Default, None);
    };
    match load_references(path, limit) {
        Ok(parsed) => (
            parsed.references,
            ReferenceSource::File(path.to_path_buf()),
            None,
        ),
        Err(e) => {
            warn!(error = %e, "using default reference string");
            (default_references(), ReferenceSource::Default, Some(e))
        }
    }
}
