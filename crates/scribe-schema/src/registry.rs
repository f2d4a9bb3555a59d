//! Central schema registry for scribe's external JSON documents.
//!
//! The `SchemaRegistry` builds JSON Schemas from scribe-core types at
//! construction time using [`schemars::schema_for!`] and provides validation
//! via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Name of the model catalog schema.
pub const MODEL_CATALOG: &str = "model_catalog";
/// Name of the run manifest schema.
pub const RUN_MANIFEST: &str = "run_manifest";

pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`. Panics if `serde_json::to_value` fails (should be
/// infallible for valid `schemars` output).
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty)).unwrap());
    };
}

impl SchemaRegistry {
    /// Build a registry with the catalog and manifest schemas.
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on a `schemars`-generated
    /// schema, which `schemars` output never triggers in practice.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        register!(schemas, MODEL_CATALOG, scribe_core::ModelCatalog);
        register!(schemas, RUN_MANIFEST, scribe_core::RunManifest);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new()
    }

    #[test]
    fn registry_lists_both_schemas() {
        assert_eq!(registry().list(), vec![MODEL_CATALOG, RUN_MANIFEST]);
    }

    #[test]
    fn get_nonexistent_schema() {
        assert!(registry().get("nonexistent").is_none());
        let err = registry()
            .validate("nonexistent", &serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(err, SchemaError::NotFound(_)));
    }

    #[test]
    fn validate_valid_catalog() {
        let catalog = serde_json::json!({
            "models": [{
                "name": "Order",
                "namespace": "shop",
                "fields": [
                    { "name": "id", "kind": "numeric", "primary_key": true },
                    { "name": "customer", "kind": "relation" },
                    { "name": "shape", "kind": "geometry" }
                ],
                "relations": [
                    { "field": "customer", "target": "Customer", "cardinality": "many_to_one" }
                ]
            }]
        });
        registry()
            .validate(MODEL_CATALOG, &catalog)
            .expect("catalog should validate");
    }

    #[test]
    fn validate_rejects_missing_field_kind() {
        let catalog = serde_json::json!({
            "models": [{
                "name": "Order",
                "namespace": "shop",
                "fields": [{ "name": "id" }]
            }]
        });
        let result = registry().validate(MODEL_CATALOG, &catalog);
        if let Err(SchemaError::ValidationFailed { errors }) = result {
            assert!(!errors.is_empty());
        } else {
            panic!("Expected ValidationFailed");
        }
    }

    #[test]
    fn validate_rejects_invalid_cardinality() {
        let catalog = serde_json::json!({
            "models": [{
                "name": "Order",
                "namespace": "shop",
                "fields": [{ "name": "customer", "kind": "relation" }],
                "relations": [
                    { "field": "customer", "target": "Customer", "cardinality": "several" }
                ]
            }]
        });
        assert!(registry().validate(MODEL_CATALOG, &catalog).is_err());
    }
}
