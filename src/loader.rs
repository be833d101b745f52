//! Config file discovery and loading.
//!
//! The config file is optional. The search order is:
//!
//! 1. `$XDG_CONFIG_HOME/sessionup/config.toml`
//! 2. `~/.config/sessionup/config.toml`
//! 3. Platform default (e.g., `~/Library/Application Support` on macOS)
//!
//! When none exists, built-in defaults are used.

use crate::config::{Config, Settings};
use crate::error::{Result, SessionupError};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "sessionup";
const CONFIG_FILE: &str = "config.toml";

/// Find an existing config file.
///
/// Returns `Ok(None)` when no config file exists in any search location.
///
/// # Errors
///
/// Returns [`SessionupError::NoConfigDir`] if neither `$XDG_CONFIG_HOME`,
/// the home directory, nor a platform config directory can be determined.
pub fn find_config_path() -> Result<Option<PathBuf>> {
    let mut candidates = Vec::new();

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        candidates.push(PathBuf::from(xdg).join(APP_DIR).join(CONFIG_FILE));
    }
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".config").join(APP_DIR).join(CONFIG_FILE));
    }
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join(APP_DIR).join(CONFIG_FILE));
    }

    if candidates.is_empty() {
        return Err(SessionupError::NoConfigDir);
    }
    Ok(candidates.into_iter().find(|path| path.exists()))
}

/// Load and parse a config file from the given path.
///
/// # Errors
///
/// - [`SessionupError::ConfigNotFound`] if the file doesn't exist
/// - [`SessionupError::IoError`] if reading fails
/// - [`SessionupError::ParseError`] if TOML parsing fails
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(SessionupError::ConfigNotFound(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path)?;
    let config = Config::from_str(&contents)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Resolve runtime settings.
///
/// An explicit path must exist. Without one, the first config found by
/// [`find_config_path`] is used, falling back to built-in defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let config = match explicit {
        Some(path) => load_config(path)?,
        None => match find_config_path()? {
            Some(path) => load_config(&path)?,
            None => Config::default(),
        },
    };
    config.settings()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let err = load_settings(Some(Path::new("/nonexistent/sessionup.toml"))).unwrap_err();
        assert!(matches!(err, SessionupError::ConfigNotFound(_)));
    }
}
