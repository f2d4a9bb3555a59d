//! End-to-end runs against a temporary output directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use scribe_codegen::fingerprint::{GENERATION_MARKER, inspect};
use scribe_codegen::format::format;
use scribe_codegen::{
    GenerateError, GenerateOptions, Generator, JsonCatalogReader, MetadataError, MetadataReader,
    RunReport, StaticCatalog,
};
use scribe_config::{ConfigError, GenerationConfig};
use scribe_core::{
    ArtifactKind, ArtifactStatus, CoreError, FailureKind, FieldDescriptor, FieldKind,
    ModelDescriptor,
};

fn fixture() -> JsonCatalogReader {
    JsonCatalogReader::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/catalog.json"))
}

fn options(dir: &Path) -> GenerateOptions {
    GenerateOptions {
        output_dir: dir.to_path_buf(),
        ..GenerateOptions::default()
    }
}

fn run(config: &GenerationConfig, dir: &Path) -> RunReport {
    Generator::new(config, options(dir))
        .run_with_reader(&fixture())
        .expect("run succeeds")
}

fn files_under(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(next) = stack.pop() {
        for entry in fs::read_dir(&next).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                found.push(path);
            }
        }
    }
    found.sort();
    found
}

/// Quoted entries of a `name = [...]` block in generated text.
fn list_block(text: &str, name: &str) -> Vec<String> {
    let header = format!("{name} = [");
    let mut lines = text.lines().skip_while(|l| l.trim() != header).skip(1);
    let mut items = Vec::new();
    for line in lines.by_ref() {
        let line = line.trim();
        if line == "]" {
            break;
        }
        items.push(line.trim_end_matches(',').trim_matches('"').to_string());
    }
    items
}

#[test]
fn first_run_writes_every_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let report = run(&GenerationConfig::default(), dir.path());

    assert_eq!(report.models_processed, 3);
    assert_eq!(report.totals().written, 12);
    assert_eq!(files_under(dir.path()).len(), 12);
    for file in files_under(dir.path()) {
        let text = fs::read_to_string(&file).unwrap();
        assert_eq!(text.lines().next(), Some(GENERATION_MARKER), "{}", file.display());
        assert!(!text.contains("__all__"), "{}", file.display());
        assert!(!text.contains("password"), "{}", file.display());
    }
}

#[test]
fn order_serializer_fields_and_read_only() {
    let dir = tempfile::tempdir().unwrap();
    run(&GenerationConfig::default(), dir.path());

    let text = fs::read_to_string(dir.path().join("shop/serializers/order.py")).unwrap();
    assert_eq!(list_block(&text, "fields"), ["id", "customer", "total", "notes"]);
    assert_eq!(list_block(&text, "read_only_fields"), ["id"]);
}

#[test]
fn sensitive_field_survives_no_override() {
    let dir = tempfile::tempdir().unwrap();
    let config = GenerationConfig {
        field_order_overrides: BTreeMap::from([(
            "shop.Order".to_string(),
            vec!["password".to_string(), "total".to_string(), "id".to_string()],
        )]),
        ..GenerationConfig::default()
    };
    run(&config, dir.path());

    let text = fs::read_to_string(dir.path().join("shop/serializers/order.py")).unwrap();
    assert_eq!(list_block(&text, "fields"), ["total", "id"]);
}

#[test]
fn second_run_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let config = GenerationConfig::default();
    run(&config, dir.path());
    let before: Vec<String> = files_under(dir.path())
        .iter()
        .map(|p| fs::read_to_string(p).unwrap())
        .collect();

    let second = run(&config, dir.path());
    let totals = second.totals();
    assert_eq!(totals.written, 0);
    assert_eq!(totals.overwritten, 0);
    assert_eq!(totals.unchanged, 12);

    let after: Vec<String> = files_under(dir.path())
        .iter()
        .map(|p| fs::read_to_string(p).unwrap())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn config_change_overwrites_pristine_files() {
    let dir = tempfile::tempdir().unwrap();
    run(&GenerationConfig::default(), dir.path());

    let config = GenerationConfig {
        extra_search_fields: BTreeMap::from([(
            "Order".to_string(),
            vec!["customer.display_name".to_string()],
        )]),
        ..GenerationConfig::default()
    };
    let report = run(&config, dir.path());
    let overwritten: Vec<_> = report
        .with_status(ArtifactStatus::Overwritten)
        .map(|a| a.path.as_str())
        .collect();
    assert_eq!(overwritten, ["shop/views/order.py", "shop/admin/order.py"]);

    let admin = fs::read_to_string(dir.path().join("shop/admin/order.py")).unwrap();
    assert_eq!(
        list_block(&admin, "search_fields"),
        ["notes", "customer__display_name"]
    );
}

#[test]
fn appended_text_blocks_regeneration() {
    let dir = tempfile::tempdir().unwrap();
    let config = GenerationConfig::default();
    run(&config, dir.path());

    let target = dir.path().join("shop/views/order.py");
    let mut edited = fs::read_to_string(&target).unwrap();
    edited.push_str("\n\ndef custom_action():\n    pass\n");
    fs::write(&target, &edited).unwrap();

    let report = run(&config, dir.path());
    let skipped: Vec<_> = report.with_status(ArtifactStatus::Skipped).collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].path, "shop/views/order.py");
    assert_eq!(
        skipped[0].reason.as_deref(),
        Some("file was modified after generation")
    );
    assert_eq!(fs::read_to_string(&target).unwrap(), edited);
}

#[test]
fn hand_written_file_is_never_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("shop/admin/customer.py");
    fs::create_dir_all(target.parent().unwrap()).unwrap();
    fs::write(&target, "from django.contrib import admin\n").unwrap();

    let report = run(&GenerationConfig::default(), dir.path());
    assert_eq!(report.summary[&ArtifactKind::Admin].skipped, 1);
    assert_eq!(report.summary[&ArtifactKind::Admin].written, 2);
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "from django.contrib import admin\n"
    );
}

#[test]
fn unknown_override_field_aborts_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let config = GenerationConfig {
        field_order_overrides: BTreeMap::from([(
            "Order".to_string(),
            vec!["id".to_string(), "shipping_code".to_string()],
        )]),
        ..GenerationConfig::default()
    };
    let err = Generator::new(&config, options(dir.path()))
        .run_with_reader(&fixture())
        .unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Config(ConfigError::UnknownField { ref field, .. }) if field == "shipping_code"
    ));
    assert!(files_under(dir.path()).is_empty());
}

#[test]
fn unknown_kind_is_a_warning_not_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    let report = run(&GenerationConfig::default(), dir.path());
    assert_eq!(
        report.warnings,
        ["ops.AuditLog.payload has unknown kind 'jsonb'; classified as ordinary"]
    );
    assert!(!report.has_failures());
}

#[test]
fn render_failure_is_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let mut models = fixture().read_models().unwrap();
    models.insert(
        0,
        ModelDescriptor::new("Broken", "shop")
            .with_field(FieldDescriptor::new("id", FieldKind::Numeric))
            .with_field(FieldDescriptor::new("not-python", FieldKind::Text)),
    );
    let report = Generator::new(&GenerationConfig::default(), options(dir.path()))
        .run_with_reader(&StaticCatalog::new(models))
        .unwrap();

    let totals = report.totals();
    assert_eq!(totals.failed, 4);
    assert_eq!(totals.written, 12);
    assert!(report.has_failures());
    assert!(!dir.path().join("shop/serializers/broken.py").exists());
}

#[test]
fn unwritable_target_fails_only_that_artifact() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("shop")).unwrap();
    fs::write(dir.path().join("shop/views"), "not a directory\n").unwrap();

    let report = run(&GenerationConfig::default(), dir.path());

    let failed: Vec<_> = report.with_status(ArtifactStatus::Failed).collect();
    let paths: Vec<_> = failed.iter().map(|o| o.path.as_str()).collect();
    assert_eq!(paths, ["shop/views/customer.py", "shop/views/order.py"]);
    assert!(failed.iter().all(|o| o.failure == Some(FailureKind::Io)));
    assert!(failed[0].reason.as_deref().unwrap().contains("shop/views/customer.py"));

    assert_eq!(report.summary[&ArtifactKind::Endpoint].failed, 2);
    assert_eq!(report.summary[&ArtifactKind::Endpoint].written, 1);
    assert_eq!(report.totals().written, 10);
    assert!(report.has_failures());
    assert!(dir.path().join("shop/admin/order.py").exists());
    assert!(dir.path().join("ops/views/audit_log.py").exists());
}

#[test]
fn models_sharing_a_module_are_rejected_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let log = |name: &str| {
        ModelDescriptor::new(name, "logs")
            .with_field(FieldDescriptor::new("id", FieldKind::Numeric).primary_key())
            .with_field(FieldDescriptor::new("path", FieldKind::Text))
    };
    let models = vec![log("HttpLog"), log("HTTPLog")];

    let err = Generator::new(&GenerationConfig::default(), options(dir.path()))
        .run(&models)
        .unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Metadata(MetadataError::Invalid(CoreError::ModuleCollision { .. }))
    ));
    assert!(files_under(dir.path()).is_empty());

    assert!(StaticCatalog::new(models).read_models().is_err());
}

#[test]
fn generated_files_are_formatter_fixed_points() {
    let dir = tempfile::tempdir().unwrap();
    run(&GenerationConfig::default(), dir.path());
    for file in files_under(dir.path()) {
        let text = fs::read_to_string(&file).unwrap();
        assert_eq!(format(&text).unwrap(), text, "{}", file.display());
        assert!(matches!(
            inspect(&text),
            scribe_codegen::fingerprint::FileProvenance::Pristine { .. }
        ));
    }
}

#[test]
fn manifest_records_every_decision() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join(".scribe-manifest.json");
    let config = GenerationConfig::default();
    let report = Generator::new(
        &config,
        GenerateOptions {
            output_dir: dir.path().join("out"),
            dry_run: false,
            manifest_path: Some(manifest.clone()),
        },
    )
    .run_with_reader(&fixture())
    .unwrap();

    assert_eq!(report.manifest.as_deref(), Some(manifest.as_path()));
    let parsed: scribe_core::RunManifest =
        serde_json::from_str(&fs::read_to_string(&manifest).unwrap()).unwrap();
    assert_eq!(parsed.entries.len(), 12);
    assert!(parsed
        .entries
        .iter()
        .all(|e| e.fingerprint.as_deref().is_some_and(|f| f.starts_with("sha256:"))));
}
