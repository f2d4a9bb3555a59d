//! Override resolution: turns classified fields plus configuration into the
//! ordered, curated field set the templates consume.
//!
//! Sensitive fields are dropped here, after overrides are applied, so no
//! override can bring one back.

use std::collections::HashSet;

use scribe_config::{ConfigError, GenerationConfig};
use scribe_core::naming::is_python_identifier;
use scribe_core::{ClassificationTag, FieldKind, ModelDescriptor};
use serde::Serialize;

use crate::classify::{ClassifiedField, classify_model};

const FIELD_ORDER_SECTION: &str = "generation.field_order_overrides";
const EXTRA_SEARCH_SECTION: &str = "generation.extra_search_fields";

/// The fields one model's artifacts are rendered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveFieldSet {
    /// Qualified model name.
    pub model: String,
    /// Serializable fields in output order. Never contains a sensitive field.
    pub fields: Vec<ClassifiedField>,
    /// Configured search paths, appended after the searchable fields.
    pub extra_search_fields: Vec<String>,
    /// Whether `fields` came from a `field_order_overrides` entry.
    pub overridden: bool,
}

impl EffectiveFieldSet {
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn with_tag(&self, tag: ClassificationTag) -> impl Iterator<Item = &ClassifiedField> {
        self.fields.iter().filter(move |f| f.tag == tag)
    }

    /// Identifier and audit fields.
    #[must_use]
    pub fn read_only(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.tag.is_read_only())
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Searchable fields followed by configured extra paths, deduplicated.
    #[must_use]
    pub fn search_paths(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.with_tag(ClassificationTag::Searchable)
            .map(|f| f.name.as_str())
            .chain(self.extra_search_fields.iter().map(String::as_str))
            .filter(|path| seen.insert(*path))
            .collect()
    }

    /// Identifier and ordinary fields, for list views.
    #[must_use]
    pub fn list_display(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| {
                matches!(
                    f.tag,
                    ClassificationTag::Identifier | ClassificationTag::Ordinary
                )
            })
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Boolean and timestamp fields, for list filters.
    #[must_use]
    pub fn filter_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| matches!(f.kind, FieldKind::Boolean | FieldKind::Timestamp))
            .map(|f| f.name.as_str())
            .collect()
    }
}

/// Apply overrides to one model's classified fields.
///
/// Default order: identifiers, then ordinary/searchable/relation fields in
/// declaration order, then audit fields. A `field_order_overrides` entry
/// replaces that order entirely.
///
/// # Errors
///
/// `ConfigError` when an override names an undeclared field, repeats a field,
/// or an extra search path is malformed.
pub fn resolve(
    model: &ModelDescriptor,
    classified: &[ClassifiedField],
    config: &GenerationConfig,
) -> Result<EffectiveFieldSet, ConfigError> {
    let qualified = model.qualified_name();

    let (ordered, overridden) = match config.field_order_override(model) {
        Some(names) => (ordered_by_override(model, classified, names)?, true),
        None => (default_order(classified), false),
    };

    let fields = ordered
        .into_iter()
        .filter(|field| {
            let keep = field.tag != ClassificationTag::Sensitive;
            if !keep && overridden {
                tracing::warn!(
                    model = %qualified,
                    field = %field.name,
                    "field order override lists a sensitive field; dropped"
                );
            }
            keep
        })
        .collect();

    let extra_search_fields = match config.extra_search_fields_for(model) {
        Some(paths) => check_search_paths(model, paths)?,
        None => Vec::new(),
    };

    Ok(EffectiveFieldSet {
        model: qualified,
        fields,
        extra_search_fields,
        overridden,
    })
}

fn default_order(classified: &[ClassifiedField]) -> Vec<ClassifiedField> {
    let rank = |tag: ClassificationTag| match tag {
        ClassificationTag::Identifier => 0,
        ClassificationTag::Audit => 2,
        _ => 1,
    };
    let mut ordered = classified.to_vec();
    // Stable sort keeps declaration order within each rank.
    ordered.sort_by_key(|f| rank(f.tag));
    ordered
}

fn ordered_by_override(
    model: &ModelDescriptor,
    classified: &[ClassifiedField],
    names: &[String],
) -> Result<Vec<ClassifiedField>, ConfigError> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateField {
                    section: FIELD_ORDER_SECTION.to_string(),
                    model: model.qualified_name(),
                    field: name.clone(),
                });
            }
            classified
                .iter()
                .find(|f| &f.name == name)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownField {
                    section: FIELD_ORDER_SECTION.to_string(),
                    model: model.qualified_name(),
                    field: name.clone(),
                })
        })
        .collect()
}

fn check_search_paths(
    model: &ModelDescriptor,
    paths: &[String],
) -> Result<Vec<String>, ConfigError> {
    let invalid = |path: &str, reason: &str| ConfigError::InvalidFieldPath {
        model: model.qualified_name(),
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|s| s.trim().is_empty()) {
            return Err(invalid(path, "empty path segment"));
        }
        if segments.len() > 2 {
            return Err(invalid(path, "paths may traverse at most one relation"));
        }
        if segments.iter().any(|s| *s == "__all__" || !is_python_identifier(s)) {
            return Err(invalid(path, "segments must be Python identifiers"));
        }

        let head = segments[0];
        let Some(field) = model.field(head) else {
            return Err(ConfigError::UnknownField {
                section: EXTRA_SEARCH_SECTION.to_string(),
                model: model.qualified_name(),
                field: head.to_string(),
            });
        };
        if segments.len() == 2 && field.kind != FieldKind::Relation {
            return Err(invalid(path, "only relation fields can be traversed"));
        }

        if !seen.insert(path.as_str()) {
            return Err(ConfigError::DuplicateField {
                section: EXTRA_SEARCH_SECTION.to_string(),
                model: model.qualified_name(),
                field: path.clone(),
            });
        }
        out.push(path.clone());
    }
    Ok(out)
}

/// Check the whole configuration against the catalog before anything is
/// written.
///
/// Override keys must name catalog models; every non-excluded model must
/// resolve cleanly.
///
/// # Errors
///
/// The first `ConfigError` found.
pub fn validate_config(
    models: &[ModelDescriptor],
    config: &GenerationConfig,
) -> Result<(), ConfigError> {
    config.validate()?;

    let known = |key: &str| {
        models
            .iter()
            .any(|m| m.name == key || m.qualified_name() == key)
    };
    for (section, keys) in [
        (FIELD_ORDER_SECTION, config.field_order_overrides.keys()),
        (EXTRA_SEARCH_SECTION, config.extra_search_fields.keys()),
    ] {
        for key in keys {
            if !known(key) {
                return Err(ConfigError::UnknownModel {
                    section: section.to_string(),
                    model: key.clone(),
                });
            }
        }
    }

    for name in &config.excluded_models {
        if !known(name) {
            tracing::warn!(model = %name, "excluded model is not in the catalog");
        }
    }

    let denylist = config.sensitive_fields();
    for model in models.iter().filter(|m| !config.is_excluded(m)) {
        let classified = classify_model(model, &denylist);
        resolve(model, &classified.fields, config)?;
    }
    Ok(())
}
