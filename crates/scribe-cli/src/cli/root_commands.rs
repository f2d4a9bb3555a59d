use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Generate serializers, filters, viewsets and admin classes.
    Generate(GenerateArgs),
    /// Show how each field is classified and which fields are rendered.
    Classify(ClassifyArgs),
    /// Print a JSON Schema for scribe's input or output documents.
    Schema(SchemaArgs),
}

/// Arguments for `scribe generate`.
#[derive(Clone, Debug, Args)]
pub struct GenerateArgs {
    /// Model catalog exported by the host project (relative to the project root)
    #[arg(short, long, default_value = "models.json")]
    pub metadata: String,
    /// Output directory (overrides `output.dir`)
    #[arg(short, long)]
    pub output: Option<String>,
    /// Decide every artifact without writing anything
    #[arg(long)]
    pub dry_run: bool,
    /// Write a run manifest, optionally to the given path
    #[arg(long, num_args = 0..=1, value_name = "PATH")]
    pub manifest: Option<Option<String>>,
}

/// Arguments for `scribe classify`.
#[derive(Clone, Debug, Args)]
pub struct ClassifyArgs {
    /// Model catalog exported by the host project (relative to the project root)
    #[arg(short, long, default_value = "models.json")]
    pub metadata: String,
    /// Only show this model (bare or qualified name)
    #[arg(long)]
    pub model: Option<String>,
}

/// Arguments for `scribe schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub document: SchemaDocument,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaDocument {
    /// The model catalog read by `generate` and `classify`.
    Catalog,
    /// The run manifest written by `generate --manifest`.
    Manifest,
}
