//! Where the client looks for its configuration file.
//!
//! The file lives at `<config dir>/stompbox/config.toml`, where the config
//! dir comes from [`dirs::config_dir`] (`$XDG_CONFIG_HOME` or `~/.config` on
//! Linux, `~/Library/Application Support` on macOS, `%APPDATA%` on Windows).

use std::path::PathBuf;

const APP_DIR: &str = "stompbox";
const CONFIG_FILE: &str = "config.toml";

/// The stompbox directory inside the platform config dir.
///
/// Falls back to `./stompbox` when the platform has no config dir.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Path of the user config file. It may not exist.
pub fn user_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE)
}

/// Create the user config directory if needed and return it.
pub fn ensure_user_config_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_config_dir();
    std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_layout() {
        let path = user_config_path();
        assert!(path.ends_with("stompbox/config.toml"));
        assert_eq!(path.parent(), Some(user_config_dir().as_path()));
    }
}
