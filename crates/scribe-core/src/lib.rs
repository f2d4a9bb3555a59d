//! # scribe-core
//!
//! Core types and error types for scribe.
//!
//! This crate provides the foundational types shared across all scribe crates:
//! - Model and field descriptors as materialized by the host data-modeling layer
//! - Field kinds, classification tags, and artifact kinds
//! - Run manifest records
//! - Python naming helpers used by the templates
//! - Cross-cutting error types

pub mod enums;
pub mod errors;
pub mod manifest;
pub mod model;
pub mod naming;

pub use enums::{
    ArtifactKind, ArtifactStatus, Cardinality, ClassificationTag, FailureKind, FieldKind,
};
pub use errors::CoreError;
pub use manifest::{ManifestEntry, RunManifest};
pub use model::{FieldDescriptor, ModelCatalog, ModelDescriptor, RelationDescriptor};

/// Name the generator stamps into provenance comments and manifests.
pub const GENERATOR_NAME: &str = "scribe";
