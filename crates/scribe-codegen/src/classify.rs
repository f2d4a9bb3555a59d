//! Field classification.
//!
//! Assigns every declared field one [`ClassificationTag`]. The sensitive
//! denylist is consulted first and is terminal: a denylisted field is
//! `sensitive` whatever its kind or flags say.

use std::collections::BTreeSet;
use std::fmt;

use scribe_core::{ClassificationTag, FieldDescriptor, FieldKind, ModelDescriptor};
use serde::Serialize;

/// Timestamp field names treated as audit columns even without the
/// `auto_timestamp` flag.
pub const AUDIT_FIELD_NAMES: [&str; 9] = [
    "created_at",
    "updated_at",
    "created",
    "modified",
    "created_on",
    "updated_on",
    "date_created",
    "date_modified",
    "deleted_at",
];

/// A declared field together with its derived tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedField {
    pub name: String,
    pub kind: FieldKind,
    pub nullable: bool,
    pub tag: ClassificationTag,
}

/// A field whose kind is outside the known set; it degrades to `ordinary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationWarning {
    pub model: String,
    pub field: String,
    pub kind: String,
}

impl fmt::Display for ClassificationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} has unknown kind '{}'; classified as ordinary",
            self.model, self.field, self.kind
        )
    }
}

/// Tag plus the warning, if the field's kind was not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub tag: ClassificationTag,
    pub warning: Option<ClassificationWarning>,
}

/// Classify one field. `denylist` must already be lowercased
/// (see `GenerationConfig::sensitive_fields`).
#[must_use]
pub fn classify(
    field: &FieldDescriptor,
    model_name: &str,
    denylist: &BTreeSet<String>,
) -> Classification {
    let lowered = field.name.to_ascii_lowercase();
    let tag = |tag| Classification { tag, warning: None };

    if denylist.contains(&lowered) {
        return tag(ClassificationTag::Sensitive);
    }
    if field.primary_key || lowered == "id" {
        return tag(ClassificationTag::Identifier);
    }

    match &field.kind {
        FieldKind::Timestamp
            if field.auto_timestamp || AUDIT_FIELD_NAMES.contains(&lowered.as_str()) =>
        {
            tag(ClassificationTag::Audit)
        }
        FieldKind::Relation => tag(ClassificationTag::Relation),
        FieldKind::Text => tag(ClassificationTag::Searchable),
        FieldKind::Unknown(raw) => Classification {
            tag: ClassificationTag::Ordinary,
            warning: Some(ClassificationWarning {
                model: model_name.to_string(),
                field: field.name.clone(),
                kind: raw.clone(),
            }),
        },
        FieldKind::Numeric | FieldKind::Boolean | FieldKind::Timestamp | FieldKind::Binary => {
            tag(ClassificationTag::Ordinary)
        }
    }
}

/// Every field of one model, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelClassification {
    pub fields: Vec<ClassifiedField>,
    pub warnings: Vec<ClassificationWarning>,
}

#[must_use]
pub fn classify_model(model: &ModelDescriptor, denylist: &BTreeSet<String>) -> ModelClassification {
    let qualified = model.qualified_name();
    let mut out = ModelClassification::default();
    for field in &model.fields {
        let Classification { tag, warning } = classify(field, &qualified, denylist);
        if let Some(warning) = warning {
            out.warnings.push(warning);
        }
        out.fields.push(ClassifiedField {
            name: field.name.clone(),
            kind: field.kind.clone(),
            nullable: field.nullable,
            tag,
        });
    }
    out
}
