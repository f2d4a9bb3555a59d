//! Configuration error types.
//!
//! Every variant is fatal to a generation run and is raised before any file
//! is written.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// An override section is keyed by a model the catalog does not contain.
    #[error("[{section}] references unknown model '{model}'")]
    UnknownModel { section: String, model: String },

    /// An override names a field the model does not declare.
    #[error("[{section}] for model '{model}' references unknown field '{field}'")]
    UnknownField {
        section: String,
        model: String,
        field: String,
    },

    /// An override lists the same field more than once.
    #[error("[{section}] for model '{model}' lists field '{field}' more than once")]
    DuplicateField {
        section: String,
        model: String,
        field: String,
    },

    /// An extra search path is malformed or traverses too far.
    #[error("Invalid search path '{path}' for model '{model}': {reason}")]
    InvalidFieldPath {
        model: String,
        path: String,
        reason: String,
    },
}
