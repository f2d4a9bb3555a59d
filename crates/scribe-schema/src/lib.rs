//! # scribe-schema
//!
//! JSON Schema generation, validation, and registry for scribe.
//!
//! This crate provides:
//! - `SchemaRegistry`: the JSON Schemas for the model catalog the host
//!   modeling layer exports and the run manifest scribe writes
//! - Validation of arbitrary JSON against a registered schema, used by the
//!   catalog reader before deserialization
//! - Schema export for external tooling (`scribe schema` command)

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::{MODEL_CATALOG, RUN_MANIFEST, SchemaRegistry};
