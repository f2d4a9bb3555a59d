use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use scribe_codegen::{
    ArtifactOutcome, GenerateOptions, Generator, JsonCatalogReader, KindSummary, MetadataReader,
    RunReport,
};
use scribe_config::ScribeConfig;
use scribe_core::{ArtifactKind, ArtifactStatus, FailureKind};
use serde::Serialize;

use crate::cli::root_commands::GenerateArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;
use crate::progress::Progress;
use crate::project;

#[derive(Debug, Serialize)]
struct ArtifactRow<'a> {
    model: &'a str,
    kind: ArtifactKind,
    path: &'a str,
    status: ArtifactStatus,
    failure: Option<FailureKind>,
    reason: Option<&'a str>,
}

impl<'a> From<&'a ArtifactOutcome> for ArtifactRow<'a> {
    fn from(outcome: &'a ArtifactOutcome) -> Self {
        Self {
            model: &outcome.model,
            kind: outcome.kind,
            path: &outcome.path,
            status: outcome.status,
            failure: outcome.failure,
            reason: outcome.reason.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SummaryRow {
    kind: String,
    written: usize,
    overwritten: usize,
    unchanged: usize,
    skipped: usize,
    failed: usize,
}

impl SummaryRow {
    fn new(kind: impl Into<String>, summary: KindSummary) -> Self {
        Self {
            kind: kind.into(),
            written: summary.written,
            overwritten: summary.overwritten,
            unchanged: summary.unchanged,
            skipped: summary.skipped,
            failed: summary.failed,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateResponse<'a> {
    output_dir: String,
    #[serde(flatten)]
    report: &'a RunReport,
    totals: KindSummary,
}

/// Handle `scribe generate`.
pub fn handle(args: &GenerateArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let root = project::project_root(flags)?;
    let config = apply_overrides(project::load_config(&root, flags)?, args);
    let options = GenerateOptions {
        output_dir: config.output_dir(&root),
        dry_run: args.dry_run,
        manifest_path: config.manifest_path(&root),
    };

    let reader = JsonCatalogReader::new(project::resolve(&root, &args.metadata));
    let models = reader
        .read_models()
        .with_context(|| format!("failed to load model catalog {}", reader.path().display()))?;

    let pending = models
        .iter()
        .filter(|m| !config.generation.is_excluded(m))
        .count()
        * ArtifactKind::ALL.len();
    let progress = Progress::bar(u64::try_from(pending).unwrap_or(u64::MAX), "generating");

    let generator = Generator::new(&config.generation, options.clone());
    let result = generator.run_observed(&models, &mut |outcome: &ArtifactOutcome| {
        progress.set_message(&outcome.path);
        progress.inc(1);
    });
    progress.finish_clear();
    let report = result.context("generation aborted before writing")?;

    print_report(&report, &options.output_dir, flags.format)?;

    let failed = report.totals().failed;
    if failed > 0 {
        anyhow::bail!("{failed} artifact(s) failed to generate");
    }
    Ok(())
}

/// Fold CLI flags into the loaded configuration.
fn apply_overrides(mut config: ScribeConfig, args: &GenerateArgs) -> ScribeConfig {
    if let Some(dir) = &args.output {
        config.output.dir.clone_from(dir);
    }
    if let Some(path) = &args.manifest {
        config.output.manifest = true;
        if let Some(path) = path {
            config.output.manifest_path = Some(path.clone());
        }
    }
    config
}

fn print_report(report: &RunReport, output_dir: &Path, format: OutputFormat) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return output(
            &GenerateResponse {
                output_dir: output_dir.display().to_string(),
                report,
                totals: report.totals(),
            },
            format,
        );
    }

    let rows: Vec<ArtifactRow<'_>> = report.artifacts.iter().map(ArtifactRow::from).collect();
    output(&rows, format)?;
    println!();
    output(&summary_rows(&report.summary, report.totals()), format)?;

    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
    if report.dry_run {
        eprintln!("dry run: nothing was written to {}", output_dir.display());
    } else if let Some(manifest) = &report.manifest {
        eprintln!("manifest: {}", manifest.display());
    }
    Ok(())
}

fn summary_rows(
    summary: &BTreeMap<ArtifactKind, KindSummary>,
    totals: KindSummary,
) -> Vec<SummaryRow> {
    let mut rows: Vec<SummaryRow> = summary
        .iter()
        .map(|(kind, counts)| SummaryRow::new(kind.as_str(), *counts))
        .collect();
    rows.push(SummaryRow::new("total", totals));
    rows
}
