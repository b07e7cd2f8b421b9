//! Error types for loading and saving client configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving, validating or persisting a [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("cannot read config file '{path}': {source}")]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be written.
    #[error("cannot write config file '{path}': {source}")]
    Write {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config directory could not be created.
    #[error("cannot create config directory '{path}': {source}")]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has mistyped keys.
    #[error("config file is not valid: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be encoded.
    #[error("cannot encode config as TOML: {0}")]
    Encode(#[from] toml::ser::Error),

    /// A setting parsed but is unusable.
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue {
        /// Setting name as it appears in the file.
        key: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Write {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key,
            reason: reason.into(),
        }
    }

    /// True if the error came from the filesystem rather than the contents.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            ConfigError::Read { .. } | ConfigError::Write { .. } | ConfigError::CreateDir { .. }
        )
    }
}
