//! Client configuration file format and resolution.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::paths::user_config_path;

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Content type sent with uploads whose type is unknown.
pub const DEFAULT_CONTENT_TYPE: &str = "audio/wav";

/// Environment variable that overrides `api_url`.
pub const API_URL_ENV: &str = "STOMPBOX_API_URL";

/// Settings for talking to the processing backend.
///
/// # TOML Format
///
/// ```toml
/// api_url = "http://localhost:8000"
/// connect_timeout_secs = 5
/// request_timeout_secs = 300
/// default_content_type = "audio/wav"
/// ```
///
/// Every key is optional; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the backend, without the `/api` suffix.
    pub api_url: String,

    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Whole-request timeout in seconds. Processing a long file can take a
    /// while, so this is generous.
    pub request_timeout_secs: u64,

    /// Content type for uploads when the caller does not supply one.
    pub default_content_type: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 300,
            default_content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write(path, e))?;
        Ok(())
    }

    /// Resolve the effective configuration.
    ///
    /// With an explicit path, that file must exist. Without one, the user
    /// config file is read if present and defaults are used otherwise. The
    /// environment is applied last.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) => Self::load(path)?,
            None => {
                let path = user_config_path();
                if path.is_file() {
                    tracing::debug!(path = %path.display(), "loading user config");
                    Self::load(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides through a lookup function.
    pub fn with_env(self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        match lookup(API_URL_ENV) {
            Some(url) if !url.trim().is_empty() => self.with_api_url(url),
            _ => Ok(self),
        }
    }

    /// Replace the backend URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Result<Self, ConfigError> {
        self.api_url = url.into().trim().to_string();
        self.validate()?;
        Ok(self)
    }

    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "api_url",
                format!("'{url}' must start with http:// or https://"),
            ));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "connect_timeout_secs",
                "must be greater than zero",
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "request_timeout_secs",
                "must be greater than zero",
            ));
        }
        if self.default_content_type.trim().is_empty() {
            return Err(ConfigError::invalid(
                "default_content_type",
                "must not be empty",
            ));
        }
        Ok(())
    }

    /// Base URL with any trailing slash removed.
    pub fn api_url(&self) -> &str {
        self.api_url.trim().trim_end_matches('/')
    }

    /// Connection timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Whole-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
