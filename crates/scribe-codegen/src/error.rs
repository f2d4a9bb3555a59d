//! Error types for the generation pipeline.
//!
//! `GenerateError` is the only error a run returns; it covers the fatal
//! stages (metadata and configuration). `ArtifactError` is per-artifact and
//! ends up in the run report instead.

use std::path::PathBuf;

use scribe_config::ConfigError;
use scribe_core::{ArtifactKind, CoreError, FailureKind};
use scribe_schema::SchemaError;
use thiserror::Error;

/// Errors from reading the model catalog.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read model catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model catalog does not match its schema: {0}")]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

/// A template could not produce text for one model and kind.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{kind} for {model}: no serializable fields remain")]
    NoFields { model: String, kind: ArtifactKind },

    #[error("{kind} for {model}: '{name}' is not a valid Python identifier")]
    InvalidIdentifier {
        model: String,
        kind: ArtifactKind,
        name: String,
    },

    #[error("{kind} for {model}: refusing to emit a wildcard field list")]
    WildcardField { model: String, kind: ArtifactKind },
}

/// Generated text is not syntactically valid Python.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("nothing to format")]
    Empty,

    #[error("line {line}: syntax error near `{near}`")]
    Syntax { line: usize, near: String },

    #[error("line {line}: expected `{expected}`")]
    Missing { line: usize, expected: String },
}

/// Why one artifact failed.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("format failed: {0}")]
    Format(#[from] FormatError),

    #[error("cannot {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ArtifactError {
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Render(_) => FailureKind::Render,
            Self::Format(_) => FailureKind::Format,
            Self::Io { .. } => FailureKind::Io,
        }
    }
}

/// Fatal errors for a whole generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}
