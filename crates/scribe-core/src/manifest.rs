//! Run manifest: an audit record of what one generation run decided per file.
//!
//! The manifest is informational. The fingerprint trailer inside each
//! generated file stays authoritative for overwrite decisions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ArtifactKind, ArtifactStatus, FailureKind};

/// One row per (model, artifact kind).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ManifestEntry {
    pub model: String,
    pub kind: ArtifactKind,
    /// Target path, relative to the output directory, `/`-separated.
    pub path: String,
    pub status: ArtifactStatus,
    /// `sha256:<hex>` of the generated text when the run produced one.
    pub fingerprint: Option<String>,
    pub reason: Option<String>,
    /// Set for `failed` entries.
    #[serde(default)]
    pub failure: Option<FailureKind>,
}

/// Serialized as `<output>/.scribe-manifest.json` unless redirected.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RunManifest {
    pub generator: String,
    pub version: String,
    pub entries: Vec<ManifestEntry>,
}

impl RunManifest {
    #[must_use]
    pub fn new(version: impl Into<String>, entries: Vec<ManifestEntry>) -> Self {
        Self {
            generator: crate::GENERATOR_NAME.to_string(),
            version: version.into(),
            entries,
        }
    }
}
