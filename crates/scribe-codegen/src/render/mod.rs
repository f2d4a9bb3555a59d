//! Literal templates, one pure function per artifact kind.
//!
//! Templates never touch the file system. [`render`] checks the inputs once
//! (identifiers, wildcards, empty field sets) and dispatches; the kind
//! modules only lay out text.

mod admin;
mod endpoint;
mod filter;
mod serializer;

use scribe_core::naming::{is_python_identifier, is_python_module_path};
use scribe_core::{ArtifactKind, GENERATOR_NAME, ModelDescriptor};

use crate::error::RenderError;
use crate::fingerprint::GENERATION_MARKER;
use crate::resolve::EffectiveFieldSet;

const WILDCARD: &str = "__all__";
const INDENT: &str = "    ";

/// Render one artifact's unformatted source text.
///
/// # Errors
///
/// [`RenderError`] when the field set is empty, a name is not a Python
/// identifier, or any field is named `__all__`.
pub fn render(
    kind: ArtifactKind,
    model: &ModelDescriptor,
    fields: &EffectiveFieldSet,
) -> Result<String, RenderError> {
    check_inputs(kind, model, fields)?;
    let text = match kind {
        ArtifactKind::Serializer => serializer::render(model, fields),
        ArtifactKind::Filter => filter::render(model, fields),
        ArtifactKind::Endpoint => endpoint::render(model, fields),
        ArtifactKind::Admin => admin::render(model, fields),
    };
    Ok(text)
}

fn check_inputs(
    kind: ArtifactKind,
    model: &ModelDescriptor,
    fields: &EffectiveFieldSet,
) -> Result<(), RenderError> {
    let qualified = model.qualified_name();
    let invalid = |name: &str| RenderError::InvalidIdentifier {
        model: qualified.clone(),
        kind,
        name: name.to_string(),
    };

    if !is_python_identifier(&model.name) {
        return Err(invalid(&model.name));
    }
    if !model.namespace.is_empty() && !is_python_module_path(&model.namespace) {
        return Err(invalid(&model.namespace));
    }
    if fields.fields.is_empty() {
        return Err(RenderError::NoFields {
            model: qualified,
            kind,
        });
    }

    let emits_search = matches!(kind, ArtifactKind::Endpoint | ArtifactKind::Admin);
    let extra = fields
        .extra_search_fields
        .iter()
        .filter(|_| emits_search)
        .flat_map(|p| p.split('.'));
    for name in fields.fields.iter().map(|f| f.name.as_str()).chain(extra) {
        if name == WILDCARD {
            return Err(RenderError::WildcardField {
                model: qualified,
                kind,
            });
        }
        if !is_python_identifier(name) {
            return Err(invalid(name));
        }
    }
    Ok(())
}

/// Line-oriented builder for a generated Python module.
struct PyModule {
    out: String,
}

impl PyModule {
    /// Start a module with the marker and provenance lines.
    fn new(kind: ArtifactKind, model: &ModelDescriptor) -> Self {
        let mut module = Self { out: String::new() };
        module.line(0, GENERATION_MARKER);
        module.line(
            0,
            format!(
                "# Source: {GENERATOR_NAME} {} template for {}",
                kind.as_str(),
                model.qualified_name()
            ),
        );
        module.blank();
        module
    }

    fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    /// `name = [...]`, one quoted item per line.
    fn string_list<S: AsRef<str>>(&mut self, depth: usize, name: &str, items: &[S]) {
        if items.is_empty() {
            self.line(depth, format!("{name} = []"));
            return;
        }
        self.line(depth, format!("{name} = ["));
        for item in items {
            self.line(depth + 1, format!("{},", quoted(item.as_ref())));
        }
        self.line(depth, "]");
    }

    /// `from <module> import <names>`.
    fn import(&mut self, module: &str, names: &str) {
        self.line(0, format!("from {module} import {names}"));
    }

    fn finish(self) -> String {
        self.out
    }
}

fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}

/// Rewrite a dotted relation path as a Django `__` lookup.
fn lookup_path(path: &str) -> String {
    path.replace('.', "__")
}
