//! Integration tests for layered configuration loading.
//!
//! Uses figment::Jail for sandboxed cwd and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use hyrax_config::{ConfigError, HyraxConfig};
use hyrax_core::enums::{PersistenceMode, RelationPolicy};
use pretty_assertions::assert_eq;

#[test]
fn loads_persistence_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[persistence]
mode = "legacy"
relation_policy = "strict"
"#,
        )?;

        let config: HyraxConfig = Figment::from(Serialized::defaults(HyraxConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.persistence.mode, PersistenceMode::Legacy);
        assert_eq!(config.persistence.relation_policy, RelationPolicy::Strict);
        assert!(!config.persistence.uses_resource_store());
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_from_dot_hyrax() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".hyrax"))
            .map_err(|e| e.to_string())?;
        jail.create_file(
            ".hyrax/config.toml",
            r#"
[minter]
prefix = "fs"

[transactions]
default_admin_set_id = "admin_set/theses"
"#,
        )?;

        let config = HyraxConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.minter.prefix, "fs");
        assert_eq!(config.transactions.default_admin_set_id, "admin_set/theses");
        assert_eq!(config.persistence.mode, PersistenceMode::Resource);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".hyrax"))
            .map_err(|e| e.to_string())?;
        jail.create_file(
            ".hyrax/config.toml",
            r#"
[persistence]
mode = "resource"
"#,
        )?;
        jail.set_env("HYRAX_PERSISTENCE__MODE", "legacy");
        jail.set_env("HYRAX_GENERAL__LOG_FILTER", "debug");

        let config = HyraxConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.persistence.mode, PersistenceMode::Legacy);
        assert_eq!(config.general.log_filter, "debug");
        Ok(())
    });
}

#[test]
fn explicit_file_layers_under_env() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
[persistence]
relation_policy = "strict"

[minter]
prefix = "abc"
"#,
        )?;
        jail.set_env("HYRAX_MINTER__PREFIX", "env");

        let config =
            HyraxConfig::load_from(std::path::Path::new("custom.toml")).map_err(|e| e.to_string())?;
        assert_eq!(config.persistence.relation_policy, RelationPolicy::Strict);
        assert_eq!(config.minter.prefix, "env");
        Ok(())
    });
}

#[test]
fn invalid_minter_prefix_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("HYRAX_MINTER__PREFIX", "no-dashes");

        let result = HyraxConfig::load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        Ok(())
    });
}

#[test]
fn unknown_mode_fails_extraction() {
    Jail::expect_with(|jail| {
        jail.set_env("HYRAX_PERSISTENCE__MODE", "fedora");

        let result = HyraxConfig::load();
        assert!(matches!(result, Err(ConfigError::Figment(_))));
        Ok(())
    });
}
