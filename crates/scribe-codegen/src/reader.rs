//! Model metadata readers.
//!
//! The modeling layer is an external collaborator: scribe never inspects
//! models itself, it consumes a catalog the host exports. Readers validate
//! the catalog once, up front, so later stages can trust the descriptors.

use std::fs;
use std::path::{Path, PathBuf};

use scribe_core::{ModelCatalog, ModelDescriptor};
use scribe_schema::{MODEL_CATALOG, SchemaRegistry};

use crate::error::MetadataError;

/// Source of model descriptors for one run.
pub trait MetadataReader {
    /// Return every registered model, in catalog order.
    fn read_models(&self) -> Result<Vec<ModelDescriptor>, MetadataError>;
}

/// Reads a JSON catalog (`{ "models": [...] }`) from disk.
#[derive(Debug, Clone)]
pub struct JsonCatalogReader {
    path: PathBuf,
}

impl JsonCatalogReader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse and validate catalog text.
    pub fn parse(text: &str) -> Result<ModelCatalog, MetadataError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        SchemaRegistry::new().validate(MODEL_CATALOG, &value)?;
        let catalog: ModelCatalog = serde_json::from_value(value)?;
        catalog.validate()?;
        Ok(catalog)
    }
}

impl MetadataReader for JsonCatalogReader {
    fn read_models(&self) -> Result<Vec<ModelDescriptor>, MetadataError> {
        let text = fs::read_to_string(&self.path).map_err(|source| MetadataError::Io {
            path: self.path.clone(),
            source,
        })?;
        let catalog = Self::parse(&text)?;
        tracing::debug!(
            path = %self.path.display(),
            models = catalog.models.len(),
            "loaded model catalog"
        );
        Ok(catalog.models)
    }
}

/// An in-memory catalog, for embedding scribe in a host build step.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    catalog: ModelCatalog,
}

impl StaticCatalog {
    #[must_use]
    pub const fn new(models: Vec<ModelDescriptor>) -> Self {
        Self {
            catalog: ModelCatalog { models },
        }
    }
}

impl MetadataReader for StaticCatalog {
    fn read_models(&self) -> Result<Vec<ModelDescriptor>, MetadataError> {
        self.catalog.validate()?;
        Ok(self.catalog.models.clone())
    }
}
