use figment::Jail;
use scribe_config::ScribeConfig;

#[test]
fn env_var_overrides_output_dir() {
    Jail::expect_with(|jail| {
        jail.set_env("SCRIBE_OUTPUT__DIR", "from-env");
        let config = ScribeConfig::load(jail.directory(), None).expect("config loads");
        assert_eq!(config.output.dir, "from-env");
        Ok(())
    });
}

#[test]
fn env_var_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".scribe")?;
        jail.create_file(".scribe/config.toml", "[output]\nmanifest = false\n")?;
        jail.set_env("SCRIBE_OUTPUT__MANIFEST", "true");

        let config = ScribeConfig::load(jail.directory(), None).expect("config loads");
        assert!(config.output.manifest);
        Ok(())
    });
}

#[test]
fn env_var_sets_excluded_models_list() {
    Jail::expect_with(|jail| {
        jail.set_env("SCRIBE_GENERATION__EXCLUDED_MODELS", "[AuditLog, Session]");
        let config = ScribeConfig::load(jail.directory(), None).expect("config loads");
        assert!(config.generation.excluded_models.contains("AuditLog"));
        assert!(config.generation.excluded_models.contains("Session"));
        Ok(())
    });
}
