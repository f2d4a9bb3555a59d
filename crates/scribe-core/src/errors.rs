//! Cross-cutting error types for scribe.
//!
//! Errors raised while checking model metadata for internal consistency.
//! Stage-specific errors (`ConfigError`, `RenderError`, ...) live in their
//! respective crates.

use thiserror::Error;

/// Errors raised by descriptor validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A model descriptor is internally inconsistent.
    #[error("Invalid model {model}: {reason}")]
    InvalidModel { model: String, reason: String },

    /// Two catalog entries share the same qualified name.
    #[error("Duplicate model in catalog: {0}")]
    DuplicateModel(String),

    /// Two models of one namespace snake-case to the same module name.
    #[error("Models {first} and {second} both map to module {module}")]
    ModuleCollision {
        first: String,
        second: String,
        module: String,
    },
}
