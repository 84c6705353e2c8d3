/// Application settings
///
/// Loaded once at startup from `settings.toml`:
/// - Linux: ~/.config/apod-gallery/settings.toml
/// - macOS: ~/Library/Application Support/apod-gallery/settings.toml
/// - Windows: %APPDATA%\apod-gallery\settings.toml
///
/// `APOD_GALLERY_CONFIG_DIR` replaces the directory, `NASA_API_KEY`
/// overrides the key from the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE: &str = "settings.toml";
const CONFIG_DIR_ENV: &str = "APOD_GALLERY_CONFIG_DIR";
const API_KEY_ENV: &str = "NASA_API_KEY";

pub const DEFAULT_API_KEY: &str = "DEMO_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov/planetary/apod";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// api.nasa.gov key; DEMO_KEY is heavily rate limited
    pub api_key: String,
    pub base_url: String,
    /// Request timeout; `None` waits indefinitely
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Where the settings file lives
pub fn config_path() -> Option<PathBuf> {
    let dir = match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::config_dir()?.join("apod-gallery"),
    };
    Some(dir.join(CONFIG_FILE))
}

/// Read settings from `path`. A missing file yields the defaults.
pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load settings, falling back to defaults on any problem.
/// The second value is a warning worth logging, if loading went wrong.
pub fn load() -> (Config, Option<String>) {
    let (mut config, warning) = match config_path() {
        Some(path) => match load_from_path(&path) {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e.to_string())),
        },
        None => (Config::default(), None),
    };

    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            config.api_key = key.trim().to_string();
        }
    }

    (config, warning)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("apod-gallery-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("apod-gallery-does-not-exist/settings.toml");
        assert_eq!(load_from_path(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = temp_file("partial.toml", "api_key = \"abc123\"\n");
        let config = load_from_path(&path).unwrap();
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, Some(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = temp_file("broken.toml", "api_key = [unterminated");
        assert!(matches!(load_from_path(&path), Err(ConfigError::Parse { .. })));
    }
}
