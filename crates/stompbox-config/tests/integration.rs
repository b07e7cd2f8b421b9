//! Integration tests for stompbox-config.
//!
//! These tests exercise configuration files on disk.

use stompbox_config::{ClientConfig, ConfigError};
use tempfile::TempDir;

#[test]
fn test_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");

    let config = ClientConfig::default()
        .with_api_url("https://fx.example.com/")
        .unwrap();
    config.save(&path).unwrap();

    let loaded = ClientConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.api_url(), "https://fx.example.com");
}

#[test]
fn test_save_creates_parent_dirs() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("config.toml");

    ClientConfig::default().save(&path).unwrap();

    assert!(path.is_file());
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");

    let err = ClientConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_resolve_explicit_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.toml");
    std::fs::write(
        &path,
        "api_url = \"http://127.0.0.1:8123\"\nrequest_timeout_secs = 30\n",
    )
    .unwrap();

    let config = ClientConfig::resolve(Some(&path)).unwrap();

    // The environment may override the URL on a developer machine.
    if std::env::var(stompbox_config::API_URL_ENV).is_err() {
        assert_eq!(config.api_url(), "http://127.0.0.1:8123");
    }
    assert_eq!(config.request_timeout_secs, 30);
}

#[test]
fn test_resolve_explicit_missing_path_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nope.toml");

    assert!(ClientConfig::resolve(Some(&path)).is_err());
}
