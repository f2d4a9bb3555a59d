//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var and cwd manipulation.

use std::path::Path;

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use scribe_config::{ConfigError, ScribeConfig};

#[test]
fn loads_generation_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[generation]
excluded_models = ["AuditLog", "shop.Session"]
sensitive_field_denylist = ["pin"]

[generation.field_order_overrides]
Order = ["id", "total", "customer"]

[generation.extra_search_fields]
Order = ["customer.display_name"]
"#,
        )?;

        let config: ScribeConfig = Figment::from(Serialized::defaults(ScribeConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.generation.excluded_models.contains("AuditLog"));
        assert!(config.generation.excluded_models.contains("shop.Session"));
        assert_eq!(
            config.generation.field_order_overrides["Order"],
            vec!["id", "total", "customer"]
        );
        assert_eq!(
            config.generation.extra_search_fields["Order"],
            vec!["customer.display_name"]
        );
        assert!(config.generation.sensitive_fields().contains("pin"));
        Ok(())
    });
}

#[test]
fn loads_output_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[output]
dir = "src/api/generated"
manifest = true
manifest_path = "audit/scribe.json"
"#,
        )?;

        let config: ScribeConfig = Figment::from(Serialized::defaults(ScribeConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.output.dir, "src/api/generated");
        assert!(config.output.manifest);
        assert_eq!(
            config.manifest_path(Path::new("/repo")),
            Some(Path::new("/repo/audit/scribe.json").to_path_buf())
        );
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_from_project_root() {
    Jail::expect_with(|jail| {
        jail.create_dir(".scribe")?;
        jail.create_file(
            ".scribe/config.toml",
            r#"
[output]
dir = "api"
"#,
        )?;

        let config = ScribeConfig::load(jail.directory(), None).expect("config loads");
        assert_eq!(config.output.dir, "api");
        Ok(())
    });
}

#[test]
fn explicit_file_beats_project_config() {
    Jail::expect_with(|jail| {
        jail.create_dir(".scribe")?;
        jail.create_file(".scribe/config.toml", "[output]\ndir = \"api\"\n")?;
        jail.create_file("ci.toml", "[output]\ndir = \"ci-out\"\n")?;

        let explicit = jail.directory().join("ci.toml");
        let config = ScribeConfig::load(jail.directory(), Some(&explicit)).expect("config loads");
        assert_eq!(config.output.dir, "ci-out");
        Ok(())
    });
}

#[test]
fn blank_excluded_model_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_dir(".scribe")?;
        jail.create_file(
            ".scribe/config.toml",
            "[generation]\nexcluded_models = [\"\"]\n",
        )?;

        let err = ScribeConfig::load(jail.directory(), None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn unknown_section_type_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_dir(".scribe")?;
        jail.create_file(
            ".scribe/config.toml",
            "[generation]\nexcluded_models = 42\n",
        )?;

        let err = ScribeConfig::load(jail.directory(), None).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
