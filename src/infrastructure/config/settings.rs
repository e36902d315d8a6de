//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for the remote database: `FIREBASE_DATABASE_URL` and `FIREBASE_AUTH_TOKEN`.
//!
//! # Example
//!
//! ```no_run
//! use quizstore::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("quizstore.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use super::local::LocalConfig;
use super::logging::{LoggingConfig, LOG_FORMATS};
use super::remote::{RemoteConfig, AUTH_TOKEN_ENV, DATABASE_URL_ENV};
use super::subscription::SubscriptionConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional; an empty file yields a local-only store backed
/// by a JSON file under the user data directory.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Local storage backend and limits.
    #[serde(default)]
    pub local: LocalConfig,

    /// Remote database connection.
    ///
    /// The auth token is loaded from `FIREBASE_AUTH_TOKEN`.
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Change subscription settings.
    #[serde(default)]
    pub subscription: SubscriptionConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_with_env(content, |name| std::env::var(name).ok())
    }

    /// Parse configuration, resolving environment overrides through `env`.
    #[allow(clippy::result_large_err)]
    pub fn parse_with_env<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        // Credentials never come from the config file.
        if let Some(url) = env(DATABASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config.remote.database_url = Some(url);
        }
        config.remote.auth_token = env(AUTH_TOKEN_ENV).filter(|t| !t.is_empty());

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise start from defaults.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("must be one of {}", LOG_FORMATS.join(", ")),
            }
            .into());
        }
        if let Err(e) = EnvFilter::try_new(&self.logging.level) {
            return Err(ConfigError::InvalidValue {
                field: "level",
                reason: e.to_string(),
            }
            .into());
        }

        if self.local.quota_bytes == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "quota_bytes",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        let url = self.remote.url()?;
        if self.remote.enabled && url.is_none() {
            return Err(ConfigError::MissingField {
                field: "database_url",
            }
            .into());
        }
        if self.remote.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.subscription.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll_interval_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
