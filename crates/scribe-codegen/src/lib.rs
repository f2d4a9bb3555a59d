//! # scribe-codegen
//!
//! Generates Django REST Framework access-layer modules (serializers,
//! filter sets, viewsets, admin registrations) from model metadata.
//!
//! Pipeline per model:
//!
//! ```text
//! MetadataReader → classify → resolve → render → format → seal → Gatekeeper
//! ```
//!
//! Every generated file starts with [`fingerprint::GENERATION_MARKER`] and
//! ends with a fingerprint trailer. The [`gatekeeper::Gatekeeper`] only
//! replaces a file whose trailer still matches its content, so hand edits are
//! never overwritten and re-running the generator is idempotent.
//!
//! Configuration problems (`ConfigError`) are detected for the whole catalog
//! before the first write. Everything after that is isolated per artifact.

pub mod classify;
pub mod error;
pub mod fingerprint;
pub mod format;
pub mod gatekeeper;
pub mod layout;
pub mod manifest;
pub mod orchestrator;
pub mod reader;
pub mod render;
pub mod resolve;

pub use classify::{ClassificationWarning, ClassifiedField, classify, classify_model};
pub use error::{ArtifactError, FormatError, GenerateError, MetadataError, RenderError};
pub use gatekeeper::{GateDecision, Gatekeeper, GeneratedArtifact, WriteConflict};
pub use orchestrator::{ArtifactOutcome, GenerateOptions, Generator, KindSummary, RunReport};
pub use reader::{JsonCatalogReader, MetadataReader, StaticCatalog};
pub use resolve::{EffectiveFieldSet, resolve, validate_config};
