//! Field kinds, relation cardinalities, classification tags, and artifact kinds.
//!
//! Closed enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `FieldKind` is the exception: it round-trips through a plain string so that
//! catalogs exported by newer modeling layers still load, with any kind outside
//! the known set preserved as [`FieldKind::Unknown`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// Storage kind of a model field.
///
/// Common ORM spellings are accepted as aliases (`char` and `email` are
/// `text`, `integer` and `decimal` are `numeric`, `foreign_key` is `relation`,
/// and so on).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Text,
    Numeric,
    Boolean,
    Timestamp,
    Relation,
    Binary,
    /// A kind string outside the known set, kept verbatim for diagnostics.
    Unknown(String),
}

impl FieldKind {
    /// Parse a kind name, resolving aliases case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" | "long_text" | "char" | "string" | "email" | "slug" | "url" | "uuid" => {
                Self::Text
            }
            "numeric" | "integer" | "big_integer" | "small_integer" | "positive_integer"
            | "decimal" | "float" => Self::Numeric,
            "boolean" | "bool" => Self::Boolean,
            "timestamp" | "datetime" | "date" | "time" => Self::Timestamp,
            "relation" | "foreign_key" | "one_to_one" | "many_to_many" => Self::Relation,
            "binary" | "bytes" | "file" | "image" => Self::Binary,
            _ => Self::Unknown(raw.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
            Self::Relation => "relation",
            Self::Binary => "binary",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for FieldKind {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Cardinality
// ---------------------------------------------------------------------------

/// Cardinality of a relation field, seen from the declaring model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    OneToOne,
    ManyToOne,
    ManyToMany,
}

impl Cardinality {
    /// Whether the relation resolves to a single row (joinable eagerly).
    #[must_use]
    pub const fn is_single(self) -> bool {
        matches!(self, Self::OneToOne | Self::ManyToOne)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneToOne => "one_to_one",
            Self::ManyToOne => "many_to_one",
            Self::ManyToMany => "many_to_many",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ClassificationTag
// ---------------------------------------------------------------------------

/// Role a field plays in the generated access layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationTag {
    Identifier,
    Audit,
    Relation,
    Searchable,
    Sensitive,
    Ordinary,
}

impl ClassificationTag {
    /// Identifier and audit fields are emitted read-only.
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::Identifier | Self::Audit)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Audit => "audit",
            Self::Relation => "relation",
            Self::Searchable => "searchable",
            Self::Sensitive => "sensitive",
            Self::Ordinary => "ordinary",
        }
    }
}

impl fmt::Display for ClassificationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ArtifactKind
// ---------------------------------------------------------------------------

/// One generated file type per model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Serializer,
    Endpoint,
    Filter,
    Admin,
}

impl ArtifactKind {
    /// Every kind, in generation order.
    pub const ALL: [Self; 4] = [Self::Serializer, Self::Filter, Self::Endpoint, Self::Admin];

    /// Sub-directory (and Python sub-package) the artifact lives in.
    #[must_use]
    pub const fn directory(self) -> &'static str {
        match self {
            Self::Serializer => "serializers",
            Self::Endpoint => "views",
            Self::Filter => "filters",
            Self::Admin => "admin",
        }
    }

    /// Suffix appended to the model name to form the generated class name.
    #[must_use]
    pub const fn class_suffix(self) -> &'static str {
        match self {
            Self::Serializer => "Serializer",
            Self::Endpoint => "ViewSet",
            Self::Filter => "Filter",
            Self::Admin => "Admin",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Serializer => "serializer",
            Self::Endpoint => "endpoint",
            Self::Filter => "filter",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ArtifactStatus
// ---------------------------------------------------------------------------

/// Terminal state of one artifact in a run.
///
/// ```text
/// absent                         → written
/// present, marked, fingerprint ok → overwritten | unchanged
/// present, unmarked or edited     → skipped
/// render / format / io error      → failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactStatus {
    Written,
    Overwritten,
    Unchanged,
    Skipped,
    Failed,
}

impl ArtifactStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Written => "written",
            Self::Overwritten => "overwritten",
            Self::Unchanged => "unchanged",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ArtifactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FailureKind
// ---------------------------------------------------------------------------

/// Pipeline stage that failed an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Render,
    Format,
    Io,
}

impl FailureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Render => "render",
            Self::Format => "format",
            Self::Io => "io",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
