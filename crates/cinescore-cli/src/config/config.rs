//! `AppConfig` struct and TOML read/write.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use cinescore_api::DEFAULT_BASE_URL;
use cinescore_tui::tier_list::DEFAULT_TITLE;

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "CINESCORE_API_URL";

/// People shown under "Featured Actors" when the config names none.
const DEFAULT_FEATURED: [u64; 5] = [206, 224_513, 3223, 10_859, 115_440];

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Search input settings.
    #[serde(default)]
    pub search: SearchConfig,
    /// Actors page settings.
    #[serde(default)]
    pub actors: ActorsConfig,
    /// Tier list settings.
    #[serde(default)]
    pub tier_list: TierListConfig,
}

/// Backend connection configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the cinescore backend.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_secs: 30,
        }
    }
}

/// Search input configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search is sent.
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

/// Actors page configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ActorsConfig {
    /// Person IDs listed under "Featured Actors".
    pub featured: Vec<u64>,
}

impl Default for ActorsConfig {
    fn default() -> Self {
        Self {
            featured: DEFAULT_FEATURED.to_vec(),
        }
    }
}

/// Tier list configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TierListConfig {
    /// Title of a new tier list.
    pub title: String,
    /// Directory for JSON exports (default: working directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl Default for TierListConfig {
    fn default() -> Self {
        Self {
            title: String::from(DEFAULT_TITLE),
            export_dir: None,
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = self.to_toml()?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Serializes the config as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config to TOML")
    }

    /// Replaces `api.base_url` when an override is given (from [`API_URL_ENV`]).
    #[must_use]
    pub fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        self
    }

    /// Parsed backend URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `api.base_url` is not a valid URL.
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.api.base_url)
            .with_context(|| format!("invalid api.base_url: {}", self.api.base_url))
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Search debounce delay.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.actors.featured, DEFAULT_FEATURED.to_vec());
        assert_eq!(config.tier_list.title, "My Custom Tier List");
        assert!(config.tier_list.export_dir.is_none());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.actors.featured = vec![6193];
        config.tier_list.export_dir = Some(PathBuf::from("/srv/tierlists"));

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_empty_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_partial_section_keeps_other_defaults() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\ndebounce_ms = 150\n\n[api]\ntimeout_secs = 5\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.debounce(), Duration::from_millis(150));
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_invalid_toml() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }

    #[test]
    fn test_api_url_override() {
        // Arrange
        let config = AppConfig::default();

        // Act
        let overridden =
            config.with_api_url_override(Some(String::from("http://10.0.0.5:9000/")));

        // Assert
        assert_eq!(overridden.base_url().unwrap().port(), Some(9000));
        let blank = AppConfig::default().with_api_url_override(Some(String::from("  ")));
        assert_eq!(blank.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_base_url() {
        // Arrange
        let mut config = AppConfig::default();
        config.api.base_url = String::from("not a url");

        // Act & Assert
        assert!(config.base_url().is_err());
    }
}
