//! Batch orchestrator.
//!
//! Two phases. First the whole configuration is validated against the whole
//! catalog; a `ConfigError` ends the run before anything is written. Then
//! every non-excluded model is rendered once per artifact kind, and each
//! artifact succeeds or fails on its own.

use std::collections::BTreeMap;
use std::path::PathBuf;

use scribe_config::GenerationConfig;
use scribe_core::{ArtifactKind, ArtifactStatus, FailureKind, ModelCatalog, ModelDescriptor};
use serde::Serialize;

use crate::classify::classify_model;
use crate::error::{ArtifactError, GenerateError, MetadataError};
use crate::fingerprint::seal;
use crate::format::format;
use crate::gatekeeper::{GateDecision, Gatekeeper, GeneratedArtifact};
use crate::layout::display_path;
use crate::manifest;
use crate::reader::MetadataReader;
use crate::render::render;
use crate::resolve::{EffectiveFieldSet, resolve, validate_config};

/// Where and how a run writes.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub output_dir: PathBuf,
    /// Decide everything, write nothing (manifest included).
    pub dry_run: bool,
    /// Write a run manifest here when set.
    pub manifest_path: Option<PathBuf>,
}

/// Final state of one (model, kind) artifact.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ArtifactOutcome {
    pub model: String,
    pub kind: ArtifactKind,
    /// Relative to the output directory, `/`-separated.
    pub path: String,
    pub status: ArtifactStatus,
    pub fingerprint: Option<String>,
    pub reason: Option<String>,
    /// Stage that failed, for `failed` outcomes.
    pub failure: Option<FailureKind>,
}

/// Per-kind status counts.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct KindSummary {
    pub written: usize,
    pub overwritten: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl KindSummary {
    const fn record(&mut self, status: ArtifactStatus) {
        match status {
            ArtifactStatus::Written => self.written += 1,
            ArtifactStatus::Overwritten => self.overwritten += 1,
            ArtifactStatus::Unchanged => self.unchanged += 1,
            ArtifactStatus::Skipped => self.skipped += 1,
            ArtifactStatus::Failed => self.failed += 1,
        }
    }

    const fn merge(&mut self, other: Self) {
        self.written += other.written;
        self.overwritten += other.overwritten;
        self.unchanged += other.unchanged;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.written + self.overwritten + self.unchanged + self.skipped + self.failed
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub dry_run: bool,
    pub models_processed: usize,
    /// Qualified names of models skipped by `excluded_models`.
    pub excluded: Vec<String>,
    /// Classification warnings and non-fatal run problems.
    pub warnings: Vec<String>,
    pub artifacts: Vec<ArtifactOutcome>,
    pub summary: BTreeMap<ArtifactKind, KindSummary>,
    /// Where the manifest was written, if it was.
    pub manifest: Option<PathBuf>,
}

impl RunReport {
    /// Counts across all kinds.
    #[must_use]
    pub fn totals(&self) -> KindSummary {
        let mut totals = KindSummary::default();
        for summary in self.summary.values() {
            totals.merge(*summary);
        }
        totals
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.totals().failed > 0
    }

    pub fn with_status(&self, status: ArtifactStatus) -> impl Iterator<Item = &ArtifactOutcome> {
        self.artifacts.iter().filter(move |a| a.status == status)
    }

    fn record(&mut self, outcome: ArtifactOutcome) {
        self.summary.entry(outcome.kind).or_default().record(outcome.status);
        self.artifacts.push(outcome);
    }
}

/// Runs the pipeline for a catalog under one immutable configuration.
#[derive(Debug)]
pub struct Generator<'a> {
    config: &'a GenerationConfig,
    options: GenerateOptions,
    gatekeeper: Gatekeeper,
}

impl<'a> Generator<'a> {
    #[must_use]
    pub const fn new(config: &'a GenerationConfig, options: GenerateOptions) -> Self {
        let gatekeeper = Gatekeeper::new(options.dry_run);
        Self {
            config,
            options,
            gatekeeper,
        }
    }

    /// Read the catalog, then [`Self::run`].
    ///
    /// # Errors
    ///
    /// `GenerateError::Metadata` if the catalog cannot be read, otherwise as
    /// [`Self::run`].
    pub fn run_with_reader(&self, reader: &dyn MetadataReader) -> Result<RunReport, GenerateError> {
        let models = reader.read_models()?;
        self.run(&models)
    }

    /// Generate every artifact for `models`.
    ///
    /// # Errors
    ///
    /// `GenerateError::Metadata` when the models are inconsistent or two of
    /// them map to the same files, `GenerateError::Config` when the
    /// configuration does not fit the catalog. Nothing has been written in
    /// either case. Per-artifact problems are reported in the [`RunReport`],
    /// not returned.
    pub fn run(&self, models: &[ModelDescriptor]) -> Result<RunReport, GenerateError> {
        self.run_observed(models, &mut |_| {})
    }

    /// [`Self::run`], calling `observer` after each artifact is decided.
    ///
    /// # Errors
    ///
    /// As [`Self::run`].
    pub fn run_observed(
        &self,
        models: &[ModelDescriptor],
        observer: &mut dyn FnMut(&ArtifactOutcome),
    ) -> Result<RunReport, GenerateError> {
        ModelCatalog::validate_models(models).map_err(MetadataError::from)?;
        validate_config(models, self.config)?;

        let denylist = self.config.sensitive_fields();
        let mut report = RunReport {
            dry_run: self.options.dry_run,
            ..RunReport::default()
        };

        for model in models {
            let qualified = model.qualified_name();
            if self.config.is_excluded(model) {
                tracing::debug!(model = %qualified, "excluded by configuration");
                report.excluded.push(qualified);
                continue;
            }

            tracing::debug!(model = %qualified, fields = model.fields.len(), "generating");
            let classified = classify_model(model, &denylist);
            for warning in &classified.warnings {
                tracing::warn!(model = %warning.model, field = %warning.field, "{warning}");
                report.warnings.push(warning.to_string());
            }
            let fields = resolve(model, &classified.fields, self.config)?;

            for kind in ArtifactKind::ALL {
                let outcome = self.generate(kind, model, &fields);
                observer(&outcome);
                report.record(outcome);
            }
            report.models_processed += 1;
        }

        if let Some(path) = &self.options.manifest_path
            && !self.options.dry_run
        {
            match manifest::write(path, &manifest::build(&report.artifacts)) {
                Ok(()) => report.manifest = Some(path.clone()),
                Err(e) => {
                    let message = format!("failed to write run manifest {}: {e}", path.display());
                    tracing::warn!("{message}");
                    report.warnings.push(message);
                }
            }
        }

        Ok(report)
    }

    fn generate(
        &self,
        kind: ArtifactKind,
        model: &ModelDescriptor,
        fields: &EffectiveFieldSet,
    ) -> ArtifactOutcome {
        let result = render(kind, model, fields)
            .map_err(ArtifactError::from)
            .and_then(|rendered| self.emit(kind, model, &rendered));
        Self::outcome(kind, model, result)
    }

    fn outcome(
        kind: ArtifactKind,
        model: &ModelDescriptor,
        result: Result<(GateDecision, String), ArtifactError>,
    ) -> ArtifactOutcome {
        let mut outcome = ArtifactOutcome {
            model: model.qualified_name(),
            kind,
            path: display_path(model, kind),
            status: ArtifactStatus::Failed,
            fingerprint: None,
            reason: None,
            failure: None,
        };
        match result {
            Ok((GateDecision::Skipped(conflict), _)) => {
                outcome.status = ArtifactStatus::Skipped;
                outcome.reason = Some(conflict.to_string());
            }
            Ok((decision, fingerprint)) => {
                outcome.status = decision.status();
                outcome.fingerprint = Some(fingerprint);
            }
            Err(error) => {
                tracing::warn!(
                    model = %outcome.model,
                    kind = %kind,
                    stage = %error.kind(),
                    "failed: {error}"
                );
                outcome.reason = Some(error.to_string());
                outcome.failure = Some(error.kind());
            }
        }
        outcome
    }

    /// format → seal → gate.
    fn emit(
        &self,
        kind: ArtifactKind,
        model: &ModelDescriptor,
        rendered: &str,
    ) -> Result<(GateDecision, String), ArtifactError> {
        let formatted = format(rendered)?;
        let artifact =
            GeneratedArtifact::prepare(kind, model, &self.options.output_dir, seal(&formatted))
                .map_err(|source| ArtifactError::Io {
                    action: "read",
                    path: display_path(model, kind),
                    source,
                })?;
        let decision = self
            .gatekeeper
            .apply(&artifact)
            .map_err(|source| ArtifactError::Io {
                action: "write",
                path: artifact.relative_path.clone(),
                source,
            })?;
        Ok((decision, artifact.fingerprint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scribe_core::{FieldDescriptor, FieldKind};

    fn options(dir: &std::path::Path) -> GenerateOptions {
        GenerateOptions {
            output_dir: dir.to_path_buf(),
            ..GenerateOptions::default()
        }
    }

    fn article() -> ModelDescriptor {
        ModelDescriptor::new("Article", "blog")
            .with_field(FieldDescriptor::new("id", FieldKind::Numeric).primary_key())
            .with_field(FieldDescriptor::new("title", FieldKind::Text))
    }

    #[test]
    fn summary_counts_every_kind() {
        let dir = tempfile::tempdir().unwrap();
        let config = GenerationConfig::default();
        let report = Generator::new(&config, options(dir.path()))
            .run(&[article()])
            .unwrap();
        assert_eq!(report.models_processed, 1);
        assert_eq!(report.summary.len(), ArtifactKind::ALL.len());
        assert_eq!(report.totals().written, 4);
        assert!(!report.has_failures());
    }

    #[test]
    fn observer_sees_each_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let config = GenerationConfig::default();
        let mut seen = Vec::new();
        Generator::new(&config, options(dir.path()))
            .run_observed(&[article()], &mut |o: &ArtifactOutcome| seen.push(o.kind))
            .unwrap();
        assert_eq!(seen, ArtifactKind::ALL);
    }

    #[test]
    fn excluded_models_produce_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = GenerationConfig {
            excluded_models: ["blog.Article".to_string()].into(),
            ..GenerationConfig::default()
        };
        let report = Generator::new(&config, options(dir.path()))
            .run(&[article()])
            .unwrap();
        assert_eq!(report.excluded, ["blog.Article"]);
        assert!(report.artifacts.is_empty());
        assert!(!dir.path().join("blog").exists());
    }

    #[test]
    fn unparsable_text_fails_only_its_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let config = GenerationConfig::default();
        let generator = Generator::new(&config, options(dir.path()));
        let model = article();

        let result = generator.emit(ArtifactKind::Serializer, &model, "class :\n    pass\n");
        let failed = Generator::outcome(ArtifactKind::Serializer, &model, result);
        assert_eq!(failed.status, ArtifactStatus::Failed);
        assert_eq!(failed.failure, Some(FailureKind::Format));
        assert!(failed.reason.unwrap().starts_with("format failed: line 1:"));
        assert!(failed.fingerprint.is_none());
        assert!(!dir.path().join("blog/serializers/article.py").exists());

        let classified = classify_model(&model, &config.sensitive_fields());
        let fields = resolve(&model, &classified.fields, &config).unwrap();
        let written = generator.generate(ArtifactKind::Serializer, &model, &fields);
        assert_eq!(written.status, ArtifactStatus::Written);
        assert_eq!(written.failure, None);
    }

    #[test]
    fn colliding_model_modules_abort_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let config = GenerationConfig::default();
        let mut shouting = article();
        shouting.name = "ARTICLE".into();
        let err = Generator::new(&config, options(dir.path()))
            .run(&[article(), shouting])
            .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Metadata(MetadataError::Invalid(
                scribe_core::CoreError::ModuleCollision { .. }
            ))
        ));
        assert!(!dir.path().join("blog").exists());
    }

    #[test]
    fn dry_run_skips_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let config = GenerationConfig::default();
        let manifest = dir.path().join("manifest.json");
        let report = Generator::new(
            &config,
            GenerateOptions {
                output_dir: dir.path().to_path_buf(),
                dry_run: true,
                manifest_path: Some(manifest.clone()),
            },
        )
        .run(&[article()])
        .unwrap();
        assert!(report.dry_run);
        assert!(report.manifest.is_none());
        assert!(!manifest.exists());
    }
}
