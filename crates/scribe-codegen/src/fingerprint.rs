//! Generation marker and inline fingerprint trailer.
//!
//! A generated file is `MARKER line + body + trailer line`:
//!
//! ```text
//! # @generated by scribe. Hand edits stop regeneration of this file.
//! ...
//! # scribe-fingerprint: sha256:<hex of everything above this line>
//! ```
//!
//! The trailer must be the final line. Text appended after it, or any change
//! above it, makes the file read as modified.

use sha2::{Digest, Sha256};

/// First line of every generated file.
pub const GENERATION_MARKER: &str =
    "# @generated by scribe. Hand edits stop regeneration of this file.";

/// Prefix of the final trailer line.
pub const FINGERPRINT_PREFIX: &str = "# scribe-fingerprint: ";

/// What an existing file on disk says about its own provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileProvenance {
    /// No generation marker on the first line: a human-owned file.
    Unmarked,
    /// Marked, but the content no longer matches the recorded fingerprint.
    Modified {
        recorded: Option<String>,
        actual: String,
    },
    /// Marked and untouched since it was generated.
    Pristine { fingerprint: String },
}

/// `sha256:<hex>` of `text`.
#[must_use]
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("sha256:{:x}", hasher.finalize())
}

/// Append the fingerprint trailer to formatted text.
///
/// `body` is expected to end with a newline, as formatter output does.
#[must_use]
pub fn seal(body: &str) -> String {
    let mut sealed = String::with_capacity(body.len() + 96);
    sealed.push_str(body);
    if !body.ends_with('\n') {
        sealed.push('\n');
    }
    let digest = fingerprint(&sealed);
    sealed.push_str(FINGERPRINT_PREFIX);
    sealed.push_str(&digest);
    sealed.push('\n');
    sealed
}

/// Fingerprint recorded in a sealed text, if it has a trailer.
#[must_use]
pub fn recorded_fingerprint(text: &str) -> Option<&str> {
    split_trailer(text).map(|(_, recorded)| recorded)
}

/// Classify existing file content.
#[must_use]
pub fn inspect(existing: &str) -> FileProvenance {
    let first_line = existing.lines().next().unwrap_or_default();
    if first_line != GENERATION_MARKER {
        return FileProvenance::Unmarked;
    }

    match split_trailer(existing) {
        Some((body, recorded)) => {
            let actual = fingerprint(body);
            if actual == recorded {
                FileProvenance::Pristine {
                    fingerprint: actual,
                }
            } else {
                FileProvenance::Modified {
                    recorded: Some(recorded.to_string()),
                    actual,
                }
            }
        }
        None => FileProvenance::Modified {
            recorded: None,
            actual: fingerprint(existing),
        },
    }
}

/// Split `text` into (body including its final newline, recorded digest).
fn split_trailer(text: &str) -> Option<(&str, &str)> {
    let without_newline = text.strip_suffix('\n')?;
    let trailer_start = without_newline.rfind('\n').map_or(0, |idx| idx + 1);
    let recorded = without_newline[trailer_start..].strip_prefix(FINGERPRINT_PREFIX)?;
    Some((&text[..trailer_start], recorded))
}
