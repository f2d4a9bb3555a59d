//! Output location settings.

use serde::{Deserialize, Serialize};

fn default_dir() -> String {
    "generated".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Root directory generated packages are written under, relative to the
    /// project root unless absolute.
    #[serde(default = "default_dir")]
    pub dir: String,

    /// Whether to write a run manifest after each run.
    #[serde(default)]
    pub manifest: bool,

    /// Manifest location; defaults to `<dir>/.scribe-manifest.json`.
    #[serde(default)]
    pub manifest_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            manifest: false,
            manifest_path: None,
        }
    }
}
