//! Run manifest output.

use std::fs;
use std::io;
use std::path::Path;

use scribe_core::{ManifestEntry, RunManifest};

use crate::orchestrator::ArtifactOutcome;

/// Build the manifest for a finished run.
#[must_use]
pub fn build(outcomes: &[ArtifactOutcome]) -> RunManifest {
    let entries = outcomes
        .iter()
        .map(|o| ManifestEntry {
            model: o.model.clone(),
            kind: o.kind,
            path: o.path.clone(),
            status: o.status,
            fingerprint: o.fingerprint.clone(),
            reason: o.reason.clone(),
            failure: o.failure,
        })
        .collect();
    RunManifest::new(env!("CARGO_PKG_VERSION"), entries)
}

/// Write `manifest` as pretty JSON, creating parent directories.
///
/// # Errors
///
/// I/O errors from the file system.
pub fn write(path: &Path, manifest: &RunManifest) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut json = serde_json::to_string_pretty(manifest).map_err(io::Error::other)?;
    json.push('\n');
    fs::write(path, json)
}
