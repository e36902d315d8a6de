//! Remote database configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::adapter::outbound::firebase::FirebaseSettings;
use crate::error::{ConfigError, Result};

/// Environment variable that overrides `[remote] database_url`.
pub const DATABASE_URL_ENV: &str = "FIREBASE_DATABASE_URL";
/// Environment variable holding the database auth token.
pub const AUTH_TOKEN_ENV: &str = "FIREBASE_AUTH_TOKEN";

/// `[remote]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    /// Path prefix under which all keys live.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    pub timeout_ms: u64,
    /// Loaded from `FIREBASE_AUTH_TOKEN`, never from the file.
    #[serde(skip)]
    pub auth_token: Option<String>,
}

const fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            database_url: None,
            root: None,
            timeout_ms: default_timeout_ms(),
            auth_token: None,
        }
    }
}

impl RemoteConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parsed database URL, if one is configured.
    #[allow(clippy::result_large_err)]
    pub fn url(&self) -> Result<Option<Url>> {
        let Some(raw) = self.database_url.as_deref().filter(|u| !u.trim().is_empty()) else {
            return Ok(None);
        };
        let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
            field: "database_url",
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "database_url",
                reason: format!("unsupported scheme '{}', expected http or https", url.scheme()),
            }
            .into());
        }
        Ok(Some(url))
    }

    /// Client settings for the Firebase adapter.
    #[allow(clippy::result_large_err)]
    pub fn firebase_settings(&self) -> Result<FirebaseSettings> {
        let database_url = self.url()?.ok_or(ConfigError::MissingField {
            field: "database_url",
        })?;
        Ok(FirebaseSettings {
            database_url,
            root: self.root.clone().filter(|r| !r.trim().is_empty()),
            auth_token: self.auth_token.clone().filter(|t| !t.is_empty()),
            timeout: self.timeout(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn remote(url: &str) -> RemoteConfig {
        RemoteConfig {
            enabled: true,
            database_url: Some(url.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn settings_carry_url_root_and_timeout() {
        let config = RemoteConfig {
            root: Some("quiz".into()),
            timeout_ms: 2500,
            auth_token: Some("secret".into()),
            ..remote("https://demo.firebaseio.com")
        };
        let settings = config.firebase_settings().unwrap();
        assert_eq!(settings.database_url.host_str(), Some("demo.firebaseio.com"));
        assert_eq!(settings.root.as_deref(), Some("quiz"));
        assert_eq!(settings.auth_token.as_deref(), Some("secret"));
        assert_eq!(settings.timeout, Duration::from_millis(2500));
    }

    #[test]
    fn blank_root_and_token_are_dropped() {
        let config = RemoteConfig {
            root: Some("  ".into()),
            auth_token: Some(String::new()),
            ..remote("https://demo.firebaseio.com")
        };
        let settings = config.firebase_settings().unwrap();
        assert!(settings.root.is_none());
        assert!(settings.auth_token.is_none());
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = remote("ftp://demo.firebaseio.com").url().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "database_url",
                ..
            })
        ));
    }

    #[test]
    fn missing_url_is_reported() {
        let err = RemoteConfig::default().firebase_settings().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "database_url"
            })
        ));
    }
}
