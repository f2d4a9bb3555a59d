//! # scribe-config
//!
//! Layered configuration loading for scribe using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SCRIBE_*` prefix, `__` as separator)
//! 2. An explicit config file (`scribe --config <path>`)
//! 3. Project-level `.scribe/config.toml`
//! 4. User-level `~/.config/scribe/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SCRIBE_OUTPUT__DIR` -> `output.dir`,
//! `SCRIBE_GENERATION__EXCLUDED_MODELS` -> `generation.excluded_models`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use scribe_config::ScribeConfig;
//!
//! let config = ScribeConfig::load(Path::new("."), None).expect("config");
//! println!("writing into {}", config.output.dir);
//! ```
//!
//! The loaded value is immutable for the duration of a run; every stage
//! receives it by reference.

mod error;
mod generation;
mod output;

pub use error::ConfigError;
pub use generation::{BUILTIN_SENSITIVE_FIELDS, GenerationConfig};
pub use output::OutputConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local configuration file, relative to the project root.
pub const PROJECT_CONFIG_PATH: &str = ".scribe/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ScribeConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl ScribeConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`ScribeConfig::load_with_dotenv`] if you
    /// need `.env` file loading.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit
            && !path.is_file()
        {
            return Err(ConfigError::InvalidValue {
                field: "--config".to_string(),
                reason: format!("file not found: {}", path.display()),
            });
        }

        let config: Self = Self::figment(project_root, explicit).extract()?;
        config.generation.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Reads `<project_root>/.env` when present, then falls back to the usual
    /// dotenv lookup from the current directory.
    pub fn load_with_dotenv(
        project_root: &Path,
        explicit: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let env_path = project_root.join(".env");
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
        } else {
            let _ = dotenvy::dotenv();
        }
        Self::load(project_root, explicit)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment(project_root: &Path, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = project_root.join(PROJECT_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit file
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("SCRIBE_").split("__"))
    }

    /// Resolve the output directory against the project root.
    #[must_use]
    pub fn output_dir(&self, project_root: &Path) -> PathBuf {
        let dir = PathBuf::from(&self.output.dir);
        if dir.is_absolute() {
            dir
        } else {
            project_root.join(dir)
        }
    }

    /// Manifest location when manifests are enabled.
    #[must_use]
    pub fn manifest_path(&self, project_root: &Path) -> Option<PathBuf> {
        if !self.output.manifest {
            return None;
        }
        Some(self.output.manifest_path.as_ref().map_or_else(
            || self.output_dir(project_root).join(".scribe-manifest.json"),
            |path| {
                let path = PathBuf::from(path);
                if path.is_absolute() {
                    path
                } else {
                    project_root.join(path)
                }
            },
        ))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("scribe").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = ScribeConfig::default();
        assert!(config.generation.excluded_models.is_empty());
        assert_eq!(config.output.dir, "generated");
        assert!(!config.output.manifest);
    }

    #[test]
    fn figment_builds_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let figment = ScribeConfig::figment(dir.path(), None);
        let config: ScribeConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.output.dir, "generated");
    }

    #[test]
    fn output_dir_is_joined_to_project_root() {
        let config = ScribeConfig::default();
        assert_eq!(
            config.output_dir(Path::new("/srv/app")),
            PathBuf::from("/srv/app/generated")
        );
    }

    #[test]
    fn manifest_path_defaults_into_output_dir() {
        let mut config = ScribeConfig::default();
        assert!(config.manifest_path(Path::new("/srv/app")).is_none());

        config.output.manifest = true;
        assert_eq!(
            config.manifest_path(Path::new("/srv/app")),
            Some(PathBuf::from("/srv/app/generated/.scribe-manifest.json"))
        );
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = ScribeConfig::load(dir.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
