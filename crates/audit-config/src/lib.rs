//! # audit-config
//!
//! Settings for the audit store: database location, the optional operate
//! log index, listing limits and display tables.
//!
//! Later sources override earlier ones:
//! 1. built-in defaults
//! 2. `<config_dir>/audit/config.toml`
//! 3. `.audit/config.toml` in the working directory
//! 4. `AUDIT_*` environment variables
//!
//! A double underscore descends into a section, so
//! `AUDIT_OPERATE_LOG_INDEX__URL` sets `operate_log_index.url`.
//!
//! # Usage
//!
//! ```no_run
//! use audit_config::AuditConfig;
//!
//! let config = AuditConfig::load_with_dotenv().expect("config");
//!
//! if config.operate_log_index.is_configured() {
//!     println!("Operate logs may use {}", config.operate_log_index.base_url());
//! }
//! ```

mod database;
mod display;
mod error;
mod general;
mod index;

pub use database::DatabaseConfig;
pub use display::DisplayConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use index::IndexConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const PROJECT_CONFIG: &str = ".audit/config.toml";
const ENV_PREFIX: &str = "AUDIT_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuditConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub operate_log_index: IndexConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AuditConfig {
    /// Merge defaults, both TOML files and `AUDIT_*` variables, then validate.
    ///
    /// `.env` files are not read here; see [`Self::load_with_dotenv`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed, and
    /// [`ConfigError::InvalidValue`] if the page size bounds are inconsistent.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// [`Self::load`], after exporting the nearest `.env` into the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// The provider chain behind [`Self::load`], lowest priority first.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(user_file) = Self::user_config_path().filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(user_file));
        }

        let project_file = PathBuf::from(PROJECT_CONFIG);
        if project_file.exists() {
            figment = figment.merge(Toml::file(project_file));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject settings no listing could satisfy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero `max_limit` or a
    /// `default_limit` above `max_limit`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.max_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.max_limit".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.general.default_limit > self.general.max_limit {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: format!(
                    "{} exceeds general.max_limit ({})",
                    self.general.default_limit, self.general.max_limit
                ),
            });
        }
        Ok(())
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("audit").join("config.toml"))
    }

    /// Export the first `.env` found between the crate and the workspace
    /// root, else one found from the current directory upwards. A missing
    /// file is not an error.
    fn load_dotenv_from_workspace() {
        let from_manifest = std::env::var_os("CARGO_MANIFEST_DIR").and_then(|dir| {
            PathBuf::from(dir)
                .ancestors()
                .take(3)
                .map(|d| d.join(".env"))
                .find(|candidate| candidate.is_file())
        });
        match from_manifest {
            Some(env_file) => {
                let _ = dotenvy::from_path(env_file);
            }
            None => {
                let _ = dotenvy::dotenv();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = AuditConfig::default();
        assert!(!config.operate_log_index.is_configured());
        assert_eq!(config.database.path, ".audit/audit.db");
        assert!(config.display.resource_types.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = AuditConfig::figment();
        let config: AuditConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.general.default_limit, 20);
        assert_eq!(config.operate_log_index.ping_timeout_secs, 2);
    }

    #[test]
    fn validate_rejects_default_above_max() {
        let mut config = AuditConfig::default();
        config.general.default_limit = 50;
        config.general.max_limit = 10;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
