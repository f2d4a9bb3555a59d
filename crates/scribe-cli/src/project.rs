use std::path::{Path, PathBuf};

use anyhow::Context;
use scribe_config::ScribeConfig;

use crate::cli::GlobalFlags;

/// `--project`, or the current directory.
pub fn project_root(flags: &GlobalFlags) -> anyhow::Result<PathBuf> {
    if let Some(path) = &flags.project {
        let explicit = PathBuf::from(path);
        if !explicit.is_dir() {
            anyhow::bail!(
                "invalid --project '{}': directory does not exist",
                explicit.display()
            );
        }
        return Ok(explicit);
    }
    std::env::current_dir().context("failed to read current directory")
}

/// Layered configuration for `root`, with `.env` support.
pub fn load_config(root: &Path, flags: &GlobalFlags) -> anyhow::Result<ScribeConfig> {
    let explicit = flags.config.as_deref().map(|path| resolve(root, path));
    ScribeConfig::load_with_dotenv(root, explicit.as_deref())
        .context("failed to load scribe configuration")
}

/// Resolve a user-supplied path against the project root.
pub fn resolve(root: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        root.join(path)
    }
}
