//! # wasp-config
//!
//! Layered configuration loading for `wasped` using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`WASPED_*` prefix, `__` as separator)
//! 2. Project-level `.wasped/config.toml`
//! 3. User-level `~/.config/wasped/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `WASPED_REPORT__TITLE` -> `report.title`,
//! `WASPED_GENERAL__LOG_FILTER` -> `general.log_filter`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use wasp_config::WaspConfig;
//!
//! let config = WaspConfig::load_with_dotenv().expect("config");
//! println!("Report title: {}", config.report.title);
//! ```

mod error;
mod general;
mod report;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use report::ReportConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory holding the project-local configuration.
pub const PROJECT_DIR: &str = ".wasped";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WaspConfig {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl WaspConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is
    /// invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on
    /// top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("WASPED_").split("__"))
    }

    /// Reject values that would produce a broken report.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a blank report title.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.title.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "report.title".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wasped").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use wasp_core::LevelGrouping;

    #[test]
    fn default_config_loads() {
        let config = WaspConfig::default();
        assert_eq!(config.report.title, "Report");
        assert_eq!(config.report.grouping, LevelGrouping::Inclusive);
        assert_eq!(config.general.log_filter, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_title_is_invalid() {
        let mut config = WaspConfig::default();
        config.report.title = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "report.title"
        ));
    }
}
