//! Backend configuration.
//!
//! The client needs two values: the hosted backend's base URL and its
//! publishable key. Environment variables win; otherwise a JSON config
//! file under the user config directory is read.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the backend base URL.
pub const ENV_BACKEND_URL: &str = "ZENALYZE_BACKEND_URL";
/// Environment variable naming the publishable key.
pub const ENV_PUBLISHABLE_KEY: &str = "ZENALYZE_PUBLISHABLE_KEY";

const CONFIG_DIR: &str = "zenalyze";
const CONFIG_FILE: &str = "config.json";

/// Errors loading the backend configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration found: set {ENV_BACKEND_URL} and {ENV_PUBLISHABLE_KEY}, or create {0}")]
    Missing(String),
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    /// Base URL, stored without a trailing slash.
    pub base_url: String,
    /// The publishable (anonymous) API key. Also used as the chat bearer
    /// when no user session is stored.
    pub publishable_key: String,
}

impl BackendConfig {
    /// Load from the environment, falling back to the config file.
    pub fn load() -> Result<Self, ConfigError> {
        if let (Ok(url), Ok(key)) = (
            std::env::var(ENV_BACKEND_URL),
            std::env::var(ENV_PUBLISHABLE_KEY),
        ) {
            if !url.trim().is_empty() && !key.trim().is_empty() {
                return Ok(Self::normalized(url, key));
            }
        }

        let path = Self::default_path();
        if path.exists() {
            return Self::from_file(&path);
        }
        Err(ConfigError::Missing(path.display().to_string()))
    }

    /// Read a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: BackendConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::normalized(config.base_url, config.publishable_key))
    }

    /// Default config file location.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    }

    fn normalized(base_url: String, publishable_key: String) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            publishable_key: publishable_key.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        std::env::remove_var(ENV_BACKEND_URL);
        std::env::remove_var(ENV_PUBLISHABLE_KEY);
    }

    #[test]
    #[serial]
    fn env_wins_and_is_normalized() {
        std::env::set_var(ENV_BACKEND_URL, "https://backend.test/ ");
        std::env::set_var(ENV_PUBLISHABLE_KEY, " pk-123 ");

        let config = BackendConfig::load().unwrap();
        assert_eq!(config.base_url, "https://backend.test");
        assert_eq!(config.publishable_key, "pk-123");

        clear_env();
    }

    #[test]
    #[serial]
    fn file_round_trip() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"base_url":"https://backend.test/","publishable_key":"pk-456"}}"#
        )
        .unwrap();

        let config = BackendConfig::from_file(&path).unwrap();
        assert_eq!(config.base_url, "https://backend.test");
        assert_eq!(config.publishable_key, "pk-456");
    }

    #[test]
    fn bad_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            BackendConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(
            BackendConfig::from_file(&path),
            Err(ConfigError::Io { .. })
        ));
    }
}
