use anyhow::Context;
use scribe_schema::{MODEL_CATALOG, RUN_MANIFEST, SchemaRegistry};

use crate::cli::root_commands::{SchemaArgs, SchemaDocument};
use crate::cli::{GlobalFlags, OutputFormat};

/// Handle `scribe schema`.
///
/// Schemas are JSON documents, so `--format table` prints pretty JSON too.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = lookup(args.document)?;
    let rendered = if flags.format == OutputFormat::Raw {
        serde_json::to_string(schema)?
    } else {
        serde_json::to_string_pretty(schema)?
    };
    println!("{rendered}");
    Ok(())
}

fn lookup(document: SchemaDocument) -> anyhow::Result<&'static serde_json::Value> {
    let name = match document {
        SchemaDocument::Catalog => MODEL_CATALOG,
        SchemaDocument::Manifest => RUN_MANIFEST,
    };
    registry()
        .get(name)
        .with_context(|| format!("schema '{name}' is not registered"))
}

fn registry() -> &'static SchemaRegistry {
    static REGISTRY: std::sync::OnceLock<SchemaRegistry> = std::sync::OnceLock::new();
    REGISTRY.get_or_init(SchemaRegistry::new)
}
