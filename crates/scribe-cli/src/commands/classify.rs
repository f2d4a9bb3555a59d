use anyhow::Context;
use scribe_codegen::{JsonCatalogReader, MetadataReader, classify_model, resolve};
use scribe_config::GenerationConfig;
use scribe_core::{ClassificationTag, ModelDescriptor};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ClassifyArgs;
use crate::output::output;
use crate::project;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct FieldRow {
    model: String,
    field: String,
    kind: String,
    tag: ClassificationTag,
    /// Position in the rendered field list, if the field is rendered at all.
    position: Option<usize>,
}

/// Handle `scribe classify`.
pub fn handle(args: &ClassifyArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let root = project::project_root(flags)?;
    let config = project::load_config(&root, flags)?;
    let reader = JsonCatalogReader::new(project::resolve(&root, &args.metadata));
    let models = reader
        .read_models()
        .with_context(|| format!("failed to load model catalog {}", reader.path().display()))?;

    let rows = classify_rows(&models, &config.generation, args.model.as_deref())?;
    output(&rows, flags.format)
}

fn classify_rows(
    models: &[ModelDescriptor],
    config: &GenerationConfig,
    only: Option<&str>,
) -> anyhow::Result<Vec<FieldRow>> {
    let selected: Vec<&ModelDescriptor> = models
        .iter()
        .filter(|m| only.is_none_or(|name| m.name == name || m.qualified_name() == name))
        .collect();
    if let Some(name) = only
        && selected.is_empty()
    {
        anyhow::bail!("model '{name}' is not in the catalog");
    }

    let denylist = config.sensitive_fields();
    let mut rows = Vec::new();
    for model in selected {
        let qualified = model.qualified_name();
        let classified = classify_model(model, &denylist);
        for warning in &classified.warnings {
            tracing::warn!("{warning}");
        }
        let effective = resolve(model, &classified.fields, config)
            .with_context(|| format!("invalid configuration for {qualified}"))?;
        let rendered = effective.names();

        for field in &classified.fields {
            rows.push(FieldRow {
                model: qualified.clone(),
                field: field.name.clone(),
                kind: field.kind.to_string(),
                tag: field.tag,
                position: rendered.iter().position(|name| *name == field.name),
            });
        }
    }
    Ok(rows)
}
