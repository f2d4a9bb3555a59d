//! Deterministic target paths and Python module paths for generated files.
//!
//! ```text
//! <output>/<namespace as dirs>/<kind dir>/<model_snake>.py
//! shop.orders + Order + serializer → shop/orders/serializers/order.py
//! ```
//!
//! Module paths are relative to the output root, which the host project puts
//! on its import path.

use std::path::PathBuf;

use scribe_core::naming::to_snake_case;
use scribe_core::{ArtifactKind, ModelDescriptor};

/// Path of the artifact relative to the output directory.
#[must_use]
pub fn artifact_path(model: &ModelDescriptor, kind: ArtifactKind) -> PathBuf {
    let mut path = PathBuf::new();
    for segment in model.namespace.split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.push(kind.directory());
    path.push(format!("{}.py", to_snake_case(&model.name)));
    path
}

/// `/`-separated form of [`artifact_path`], stable across platforms.
#[must_use]
pub fn display_path(model: &ModelDescriptor, kind: ArtifactKind) -> String {
    let mut parts: Vec<String> = model
        .namespace
        .split('.')
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect();
    parts.push(kind.directory().to_string());
    parts.push(format!("{}.py", to_snake_case(&model.name)));
    parts.join("/")
}

/// Dotted import path of the generated module.
#[must_use]
pub fn module_path(model: &ModelDescriptor, kind: ArtifactKind) -> String {
    prefixed(
        &model.namespace,
        &format!("{}.{}", kind.directory(), to_snake_case(&model.name)),
    )
}

/// Dotted import path of the host's models module.
#[must_use]
pub fn models_module(model: &ModelDescriptor) -> String {
    prefixed(&model.namespace, "models")
}

/// Generated class name, e.g. `OrderSerializer`.
#[must_use]
pub fn class_name(model: &ModelDescriptor, kind: ArtifactKind) -> String {
    format!("{}{}", model.name, kind.class_suffix())
}

fn prefixed(namespace: &str, rest: &str) -> String {
    if namespace.is_empty() {
        rest.to_string()
    } else {
        format!("{namespace}.{rest}")
    }
}
