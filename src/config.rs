//! Configuration management module.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "MOVING_API_BASE_URL";

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// REST API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Data source selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Use the built-in sample dataset instead of the API.
    #[serde(default)]
    pub mock: bool,
}

/// UI preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Number of upcoming appointments on the dashboard.
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
}

fn default_upcoming_limit() -> usize {
    crate::dashboard::UPCOMING_LIMIT
}

impl AppConfig {
    /// Get config file path in the platform config directory.
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("com", "MovingScheduler", "moving-scheduler")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Directory for rolling log files.
    pub fn log_dir() -> PathBuf {
        ProjectDirs::from("com", "MovingScheduler", "moving-scheduler")
            .map(|dirs| dirs.data_local_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Apply the base URL environment override if it is set and non-empty.
    pub fn apply_env(&mut self) {
        self.apply_base_url_override(std::env::var(BASE_URL_ENV).ok());
    }

    fn apply_base_url_override(&mut self, value: Option<String>) {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            self.api.base_url = url;
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Mock mode never builds an HTTP client.
        if !self.data.mock {
            let url = self.api.base_url.trim();
            if url.is_empty() {
                return Err(ConfigError::Validation("API base URL cannot be empty".to_string()));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Validation(
                    "API base URL must start with http:// or https://".to_string(),
                ));
            }
        }
        if self.api.timeout_secs < 1 {
            return Err(ConfigError::Validation(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.ui.upcoming_limit < 1 || self.ui.upcoming_limit > 50 {
            return Err(ConfigError::Validation(
                "Upcoming limit must be between 1 and 50".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            upcoming_limit: default_upcoming_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.base_url, "http://localhost:5001");
        assert!(!config.data.mock);
    }

    #[test]
    fn test_validation_invalid_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "ftp://invalid".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_timeout_and_limit() {
        let mut config = AppConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.api.timeout_secs = 10;
        config.ui.upcoming_limit = 0;
        assert!(config.validate().is_err());

        config.ui.upcoming_limit = 51;
        assert!(config.validate().is_err());

        config.ui.upcoming_limit = 5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str("[data]\nmock = true\n").unwrap();
        assert!(config.data.mock);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.ui.upcoming_limit, 5);
    }

    #[test]
    fn test_partial_api_section_keeps_other_settings() {
        let config: AppConfig = toml::from_str("[api]\ntimeout_secs = 10\n\n[data]\nmock = true\n").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5001");
        assert_eq!(config.api.timeout_secs, 10);
        assert!(config.data.mock);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mock_mode_skips_url_validation() {
        let mut config = AppConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.data.mock = true;
        assert!(config.validate().is_ok());

        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_url_override() {
        let mut config = AppConfig::default();
        config.apply_base_url_override(Some("".to_string()));
        assert_eq!(config.api.base_url, "http://localhost:5001");

        config.apply_base_url_override(Some(" https://api.example.com ".to_string()));
        assert_eq!(config.api.base_url, "https://api.example.com");

        config.apply_base_url_override(None);
        assert_eq!(config.api.base_url, "https://api.example.com");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.api.base_url = "http://10.0.0.5:8080".to_string();
        config.data.mock = true;
        config.save(&path).unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => {
                assert_eq!(loaded.api.base_url, "http://10.0.0.5:8080");
                assert!(loaded.data.mock);
            }
            other => panic!("unexpected load result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Missing));

        std::fs::write(&path, "[api]\nbase_url = \"nope\"\n").unwrap();
        assert!(matches!(
            AppConfig::try_load(&path),
            ConfigLoadResult::Invalid(ConfigError::Validation(_))
        ));

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(
            AppConfig::try_load(&path),
            ConfigLoadResult::Invalid(ConfigError::Parse(_))
        ));
    }
}
