//! Generation settings: exclusions, per-model overrides, and the sensitive
//! field denylist.
//!
//! Override maps are keyed by model name. A key may be the bare name
//! (`Order`) or the namespace-qualified name (`shop.Order`); the qualified key
//! wins when both are present.

use std::collections::{BTreeMap, BTreeSet};

use scribe_core::ModelDescriptor;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Field names that are always treated as sensitive, whatever the
/// configuration says. Matched case-insensitively against the full name.
pub const BUILTIN_SENSITIVE_FIELDS: [&str; 12] = [
    "password",
    "password_hash",
    "secret",
    "secret_key",
    "token",
    "access_token",
    "refresh_token",
    "api_key",
    "private_key",
    "salt",
    "otp_secret",
    "ssn",
];

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Models to skip entirely.
    #[serde(default)]
    pub excluded_models: BTreeSet<String>,

    /// Replacement field order per model. Sensitive fields are still dropped.
    #[serde(default)]
    pub field_order_overrides: BTreeMap<String, Vec<String>>,

    /// Extra search paths per model; may traverse one relation
    /// (`owner.display_name`).
    #[serde(default)]
    pub extra_search_fields: BTreeMap<String, Vec<String>>,

    /// Additional sensitive field names, on top of [`BUILTIN_SENSITIVE_FIELDS`].
    #[serde(default)]
    pub sensitive_field_denylist: BTreeSet<String>,
}

impl GenerationConfig {
    /// Whether `model` is listed in `excluded_models`.
    #[must_use]
    pub fn is_excluded(&self, model: &ModelDescriptor) -> bool {
        self.excluded_models.contains(&model.qualified_name())
            || self.excluded_models.contains(&model.name)
    }

    #[must_use]
    pub fn field_order_override(&self, model: &ModelDescriptor) -> Option<&[String]> {
        lookup(&self.field_order_overrides, model)
    }

    #[must_use]
    pub fn extra_search_fields_for(&self, model: &ModelDescriptor) -> Option<&[String]> {
        lookup(&self.extra_search_fields, model)
    }

    /// Effective denylist: built-ins plus configured names, lowercased.
    #[must_use]
    pub fn sensitive_fields(&self) -> BTreeSet<String> {
        BUILTIN_SENSITIVE_FIELDS
            .iter()
            .map(|name| (*name).to_string())
            .chain(
                self.sensitive_field_denylist
                    .iter()
                    .map(|name| name.trim().to_ascii_lowercase()),
            )
            .collect()
    }

    /// Check the configuration on its own, before it meets a catalog.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for blank model keys, blank field
    /// names, or blank denylist entries.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let blank = |field: &str, reason: &str| ConfigError::InvalidValue {
            field: field.to_string(),
            reason: reason.to_string(),
        };

        if self.excluded_models.iter().any(|m| m.trim().is_empty()) {
            return Err(blank(
                "generation.excluded_models",
                "model names must not be blank",
            ));
        }

        for (section, map) in [
            ("field_order_overrides", &self.field_order_overrides),
            ("extra_search_fields", &self.extra_search_fields),
        ] {
            for (model, fields) in map {
                if model.trim().is_empty() {
                    return Err(blank(
                        &format!("generation.{section}"),
                        "model keys must not be blank",
                    ));
                }
                if fields.iter().any(|f| f.trim().is_empty()) {
                    return Err(blank(
                        &format!("generation.{section}.{model}"),
                        "field names must not be blank",
                    ));
                }
            }
        }

        if self
            .sensitive_field_denylist
            .iter()
            .any(|f| f.trim().is_empty())
        {
            return Err(blank(
                "generation.sensitive_field_denylist",
                "field names must not be blank",
            ));
        }

        Ok(())
    }
}

fn lookup<'a>(
    map: &'a BTreeMap<String, Vec<String>>,
    model: &ModelDescriptor,
) -> Option<&'a [String]> {
    map.get(&model.qualified_name())
        .or_else(|| map.get(&model.name))
        .map(Vec::as_slice)
}
