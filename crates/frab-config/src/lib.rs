//! # frab-config
//!
//! Layered configuration loading for frabsync using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FRABSYNC_*` prefix, `__` as separator)
//! 2. Project-level `.frabsync/config.toml`
//! 3. User-level `~/.config/frabsync/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FRABSYNC_DATABASE__PATH` -> `database.path`,
//! `FRABSYNC_SYNC__TICK_SECS` -> `sync.tick_secs`, etc. The `__` (double
//! underscore) separates nested config sections.

mod database;
mod error;
mod sync;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use sync::SyncConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FrabConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

impl FrabConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` before building the figment. This is the typical
    /// entry point for the CLI and tests.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or layer additional
    /// providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".frabsync/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("FRABSYNC_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("frabsync").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = FrabConfig::default();
        assert_eq!(config.database.path, "frabsync.db");
        assert_eq!(config.sync.default_interval_minutes, 5);
    }

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("FRABSYNC_DATABASE__PATH", "/tmp/other.db");
            jail.set_env("FRABSYNC_SYNC__TICK_SECS", "5");
            let config: FrabConfig = FrabConfig::figment().extract()?;
            assert_eq!(config.database.path, "/tmp/other.db");
            assert_eq!(config.sync.tick_secs, 5);
            Ok(())
        });
    }

    #[test]
    fn toml_layer_merges_under_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".frabsync")?;
            jail.create_file(
                ".frabsync/config.toml",
                r#"
                    [sync]
                    user_agent = "conference-mirror/2"
                    tick_secs = 10
                "#,
            )?;
            jail.set_env("FRABSYNC_SYNC__TICK_SECS", "3");
            let config: FrabConfig = FrabConfig::figment().extract()?;
            assert_eq!(config.sync.user_agent, "conference-mirror/2");
            assert_eq!(config.sync.tick_secs, 3);
            Ok(())
        });
    }
}
