//! # hyrax-config
//!
//! Layered configuration loading for the Hyrax persistence core using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`HYRAX_*` prefix, `__` as separator)
//! 2. Project-level `.hyrax/config.toml`
//! 3. User-level `~/.config/hyrax/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `HYRAX_PERSISTENCE__MODE` -> `persistence.mode`,
//! `HYRAX_MINTER__PREFIX` -> `minter.prefix`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use hyrax_config::HyraxConfig;
//!
//! let config = HyraxConfig::load_with_dotenv().expect("config");
//! if config.persistence.uses_resource_store() {
//!     println!("ingesting through the resource store");
//! }
//! ```

mod error;
mod general;
mod minter;
mod persistence;
mod transactions;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use minter::MinterConfig;
pub use persistence::PersistenceConfig;
pub use transactions::TransactionsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HyraxConfig {
    #[serde(default)]
    pub persistence: PersistenceConfig,
    #[serde(default)]
    pub minter: MinterConfig,
    #[serde(default)]
    pub transactions: TransactionsConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl HyraxConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load with an explicit config file layered between the standard files
    /// and the environment (the CLI `--config` flag).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let figment = Self::file_layers()
            .merge(Toml::file(path))
            .merge(Self::env_provider());
        Self::extract(figment)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::file_layers().merge(Self::env_provider())
    }

    fn file_layers() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".hyrax/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
    }

    fn env_provider() -> Env {
        Env::prefixed("HYRAX_").split("__")
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.minter.validate()?;
        Ok(config)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hyrax").join("config.toml"))
    }
}
