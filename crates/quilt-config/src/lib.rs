//! # quilt-config
//!
//! Layered configuration loading for Quilt using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`QUILT_*` prefix, `__` as separator)
//! 2. Project-level `.quilt/config.toml`
//! 3. User-level `~/.config/quilt/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `QUILT_SCAN__BACKEND_PATH` -> `scan.backend_path`,
//! `QUILT_GENERAL__OUTPUT_DIR` -> `general.output_dir`, etc. The `__`
//! (double underscore) separates nested config sections.

mod error;
mod general;
mod scan;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use scan::ScanConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QuiltConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

impl QuiltConfig {
    /// Load configuration from all sources (TOML files + environment
    /// variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if `.env`
    /// loading is needed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// This is the typical entry point for the CLI and tests.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or layer additional
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".quilt/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("QUILT_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("quilt").join("config.toml"))
    }
}
