use std::collections::{HashMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Cardinality, FieldKind};
use crate::errors::CoreError;
use crate::naming::to_snake_case;

/// One persisted field as declared by the data-modeling layer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    #[schemars(with = "String")]
    pub kind: FieldKind,
    #[serde(default)]
    pub nullable: bool,
    /// Set by the modeling layer for the primary-key column.
    #[serde(default)]
    pub primary_key: bool,
    /// Set for timestamps the modeling layer maintains itself
    /// (`auto_now` / `auto_now_add` style columns).
    #[serde(default)]
    pub auto_timestamp: bool,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            nullable: false,
            primary_key: false,
            auto_timestamp: false,
        }
    }

    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub const fn auto_timestamp(mut self) -> Self {
        self.auto_timestamp = true;
        self
    }
}

/// Target and cardinality of a relation-kind field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RelationDescriptor {
    /// Name of the relation field on the declaring model.
    pub field: String,
    /// Target model name.
    pub target: String,
    pub cardinality: Cardinality,
}

/// A persisted data model: identity, ordered fields, and relations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub name: String,
    /// Owning module, dotted (e.g. `shop.orders`).
    pub namespace: String,
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub relations: Vec<RelationDescriptor>,
}

impl ModelDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            fields: Vec::new(),
            relations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a relation field together with its descriptor.
    #[must_use]
    pub fn with_relation(
        mut self,
        field: impl Into<String>,
        target: impl Into<String>,
        cardinality: Cardinality,
    ) -> Self {
        let field = field.into();
        self.fields
            .push(FieldDescriptor::new(field.clone(), FieldKind::Relation));
        self.relations.push(RelationDescriptor {
            field,
            target: target.into(),
            cardinality,
        });
        self
    }

    /// `namespace.Name`, used in diagnostics and provenance comments.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn relation_for(&self, field: &str) -> Option<&RelationDescriptor> {
        self.relations.iter().find(|r| r.field == field)
    }

    /// Check the descriptor is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidModel` for an empty name, duplicate field
    /// names, a relation field without a relation descriptor, or a relation
    /// descriptor that does not point at a relation-kind field.
    pub fn validate(&self) -> Result<(), CoreError> {
        let invalid = |reason: String| CoreError::InvalidModel {
            model: self.qualified_name(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("model name is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(invalid(format!("duplicate field '{}'", field.name)));
            }
            if field.kind == FieldKind::Relation && self.relation_for(&field.name).is_none() {
                return Err(invalid(format!(
                    "relation field '{}' has no relation descriptor",
                    field.name
                )));
            }
        }

        for relation in &self.relations {
            match self.field(&relation.field) {
                Some(field) if field.kind == FieldKind::Relation => {}
                Some(_) => {
                    return Err(invalid(format!(
                        "relation descriptor '{}' points at a non-relation field",
                        relation.field
                    )));
                }
                None => {
                    return Err(invalid(format!(
                        "relation descriptor '{}' has no matching field",
                        relation.field
                    )));
                }
            }
        }

        Ok(())
    }
}

/// The full set of models exported by the modeling layer for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ModelCatalog {
    pub models: Vec<ModelDescriptor>,
}

impl ModelCatalog {
    /// Validate every model and reject duplicate qualified names.
    ///
    /// # Errors
    ///
    /// Returns the first `CoreError` found.
    pub fn validate(&self) -> Result<(), CoreError> {
        Self::validate_models(&self.models)
    }

    /// [`Self::validate`] over a borrowed model list.
    ///
    /// Besides per-model checks, two models of one namespace may not share a
    /// snake-cased name: they would generate the same module files.
    ///
    /// # Errors
    ///
    /// Returns the first `CoreError` found.
    pub fn validate_models(models: &[ModelDescriptor]) -> Result<(), CoreError> {
        let mut seen = HashSet::new();
        let mut modules: HashMap<(&str, String), &ModelDescriptor> = HashMap::new();
        for model in models {
            model.validate()?;
            let qualified = model.qualified_name();
            if !seen.insert(qualified.clone()) {
                return Err(CoreError::DuplicateModel(qualified));
            }
            let module = to_snake_case(&model.name);
            if let Some(first) = modules.insert((model.namespace.as_str(), module.clone()), model) {
                return Err(CoreError::ModuleCollision {
                    first: first.qualified_name(),
                    second: qualified,
                    module: format!("{}.{module}", model.namespace),
                });
            }
        }
        Ok(())
    }
}
