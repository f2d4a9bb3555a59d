//! Write gatekeeper: the only code that touches generated files on disk.
//!
//! ```text
//! absent                               → Written
//! present, no marker                   → Skipped(Unmarked)
//! present, marker, fingerprint differs → Skipped(FingerprintMismatch)
//! present, marker, fingerprint matches → Overwritten, or Unchanged if identical
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use scribe_core::{ArtifactKind, ArtifactStatus, ModelDescriptor};
use serde::Serialize;

use crate::fingerprint::{FileProvenance, inspect, recorded_fingerprint};
use crate::layout::{artifact_path, display_path};

/// Why an existing file was left alone.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WriteConflict {
    /// The file does not start with the generation marker.
    Unmarked,
    /// The file was generated but edited afterwards.
    FingerprintMismatch,
}

impl fmt::Display for WriteConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unmarked => "existing file has no generation marker",
            Self::FingerprintMismatch => "file was modified after generation",
        })
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "decision", content = "conflict")]
pub enum GateDecision {
    Written,
    Overwritten,
    Unchanged,
    Skipped(WriteConflict),
}

impl GateDecision {
    #[must_use]
    pub const fn status(self) -> ArtifactStatus {
        match self {
            Self::Written => ArtifactStatus::Written,
            Self::Overwritten => ArtifactStatus::Overwritten,
            Self::Unchanged => ArtifactStatus::Unchanged,
            Self::Skipped(_) => ArtifactStatus::Skipped,
        }
    }

    const fn writes(self) -> bool {
        matches!(self, Self::Written | Self::Overwritten)
    }
}

/// One rendered, formatted and sealed artifact plus what is on disk now.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    /// Qualified model name.
    pub model: String,
    /// Absolute (or output-rooted) target path.
    pub path: PathBuf,
    /// Target path relative to the output directory, `/`-separated.
    pub relative_path: String,
    /// Sealed text, trailer included.
    pub text: String,
    pub fingerprint: String,
    pub already_exists: bool,
    pub was_modified_since_generation: bool,
    #[serde(skip)]
    existing: Option<Existing>,
}

#[derive(Debug, Clone)]
struct Existing {
    provenance: FileProvenance,
    identical: bool,
}

impl GeneratedArtifact {
    /// Pair sealed text with its target and inspect the current file.
    ///
    /// Non-UTF-8 content is treated as a hand-written file.
    ///
    /// # Errors
    ///
    /// I/O errors other than "not found" while reading the existing file.
    pub fn prepare(
        kind: ArtifactKind,
        model: &ModelDescriptor,
        output_dir: &Path,
        sealed: String,
    ) -> io::Result<Self> {
        let path = output_dir.join(artifact_path(model, kind));
        let existing = match fs::read(&path) {
            Ok(bytes) => Some(match String::from_utf8(bytes) {
                Ok(current) => Existing {
                    provenance: inspect(&current),
                    identical: current == sealed,
                },
                Err(_) => Existing {
                    provenance: FileProvenance::Unmarked,
                    identical: false,
                },
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };

        let fingerprint = recorded_fingerprint(&sealed)
            .unwrap_or_default()
            .to_string();
        Ok(Self {
            kind,
            model: model.qualified_name(),
            relative_path: display_path(model, kind),
            path,
            fingerprint,
            already_exists: existing.is_some(),
            was_modified_since_generation: existing
                .as_ref()
                .is_some_and(|e| matches!(e.provenance, FileProvenance::Modified { .. })),
            existing,
            text: sealed,
        })
    }

    /// What the gatekeeper will do with this artifact.
    #[must_use]
    pub const fn decision(&self) -> GateDecision {
        match &self.existing {
            None => GateDecision::Written,
            Some(Existing {
                provenance: FileProvenance::Unmarked,
                ..
            }) => GateDecision::Skipped(WriteConflict::Unmarked),
            Some(Existing {
                provenance: FileProvenance::Modified { .. },
                ..
            }) => GateDecision::Skipped(WriteConflict::FingerprintMismatch),
            Some(Existing {
                provenance: FileProvenance::Pristine { .. },
                identical: true,
            }) => GateDecision::Unchanged,
            Some(Existing {
                provenance: FileProvenance::Pristine { .. },
                identical: false,
            }) => GateDecision::Overwritten,
        }
    }
}

/// Applies gate decisions. In dry-run mode nothing is written.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gatekeeper {
    dry_run: bool,
}

impl Gatekeeper {
    #[must_use]
    pub const fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Decide and, unless dry-running, write.
    ///
    /// # Errors
    ///
    /// I/O errors creating the parent directory or writing the file.
    pub fn apply(&self, artifact: &GeneratedArtifact) -> io::Result<GateDecision> {
        let decision = artifact.decision();
        if decision.writes() && !self.dry_run {
            if let Some(parent) = artifact.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&artifact.path, &artifact.text)?;
        }

        match decision {
            GateDecision::Skipped(conflict) => tracing::warn!(
                path = %artifact.relative_path,
                model = %artifact.model,
                kind = %artifact.kind,
                dry_run = self.dry_run,
                "skipped: {conflict}"
            ),
            _ => tracing::info!(
                path = %artifact.relative_path,
                model = %artifact.model,
                kind = %artifact.kind,
                dry_run = self.dry_run,
                "{}",
                decision.status()
            ),
        }
        Ok(decision)
    }
}
