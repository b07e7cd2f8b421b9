//! Client configuration for the stompbox processing backend.
//!
//! Settings resolve in layers: built-in defaults, then a TOML file, then the
//! environment. Command-line overrides are applied by the caller on top.
//!
//! # Example
//!
//! ```rust,no_run
//! use stompbox_config::{ClientConfig, user_config_path};
//!
//! // Defaults, the user config file if present, then STOMPBOX_API_URL
//! let config = ClientConfig::resolve(None).unwrap();
//! println!("backend at {}", config.api_url());
//!
//! // Write a starter file
//! ClientConfig::default().save(user_config_path()).unwrap();
//! ```

mod client_config;
mod error;

/// Platform-specific paths for configuration.
pub mod paths;

pub use client_config::{API_URL_ENV, ClientConfig, DEFAULT_API_URL, DEFAULT_CONTENT_TYPE};
pub use error::ConfigError;
pub use paths::{ensure_user_config_dir, user_config_dir, user_config_path};
