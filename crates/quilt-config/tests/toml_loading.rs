//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use quilt_config::QuiltConfig;

#[test]
fn loads_general_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
stories_dir = "docs/stories"
output_dir = "out/test-plans"
enable_inference = true
"#,
        )?;

        let config: QuiltConfig = Figment::from(Serialized::defaults(QuiltConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.stories_dir, "docs/stories");
        assert_eq!(config.general.output_dir, "out/test-plans");
        assert!(config.general.enable_inference);
        Ok(())
    });
}

#[test]
fn loads_scan_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[scan]
backend_path = "services/backend"
frontend_path = "apps/web"
scan_frontend = false
exclude_patterns = ["**/generated/**"]
"#,
        )?;

        let config: QuiltConfig = Figment::from(Serialized::defaults(QuiltConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.scan.backend_path, "services/backend");
        assert_eq!(config.scan.frontend_path, "apps/web");
        assert!(!config.scan.scan_frontend);
        assert!(config.scan.scan_backend);
        assert_eq!(config.scan.exclude_patterns, vec!["**/generated/**"]);
        Ok(())
    });
}

#[test]
fn partial_toml_falls_back_to_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
output_dir = "custom-output"
"#,
        )?;

        let config: QuiltConfig = Figment::from(Serialized::defaults(QuiltConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.output_dir, "custom-output");
        assert_eq!(config.general.stories_dir, "user-stories");
        assert_eq!(config.scan.backend_path, "backend");
        Ok(())
    });
}

#[test]
fn defaults_load_without_any_sources() {
    Jail::expect_with(|_jail| {
        let config = QuiltConfig::load().expect("defaults load");
        assert_eq!(config.general.stories_dir, "user-stories");
        assert_eq!(config.general.output_dir, "test-plans");
        assert!(!config.general.enable_inference);
        assert!(config.scan.extract_endpoints);
        Ok(())
    });
}
