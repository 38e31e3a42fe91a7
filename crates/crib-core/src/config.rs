//! Configuration management for crib.
//!
//! Loads configuration from ${CRIB_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api_base_url`.
pub const API_BASE_URL_ENV: &str = "CRIB_API_BASE_URL";

/// Returns the embedded default config template (with comments).
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// New comments from the template are kept while the user's values win.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;
    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for crib configuration and data directories.
    //!
    //! CRIB_HOME resolution order:
    //! 1. CRIB_HOME environment variable (if set)
    //! 2. ~/.config/crib (default)

    use std::path::PathBuf;

    /// Returns the crib home directory.
    pub fn crib_home() -> PathBuf {
        if let Ok(home) = std::env::var("CRIB_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("crib"))
            .unwrap_or_else(|| PathBuf::from(".crib"))
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        crib_home().join("config.toml")
    }

    /// Returns the key-value storage directory.
    pub fn storage_dir() -> PathBuf {
        crib_home().join("storage")
    }

    /// Returns the log directory.
    pub fn logs_dir() -> PathBuf {
        crib_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend base URL (no trailing slash required)
    pub api_base_url: String,

    /// Timeout for backend requests in seconds (0 disables)
    pub request_timeout_secs: u64,

    /// Seconds before a new code can be requested
    pub resend_window_secs: u64,

    /// Tracing filter directive used when CRIB_LOG is unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Config {
    pub const DEFAULT_API_BASE_URL: &str = "https://whispering-headland-00232.herokuapp.com";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
    pub const DEFAULT_RESEND_WINDOW_SECS: u64 = 30;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Returns the effective backend base URL.
    ///
    /// `CRIB_API_BASE_URL` wins over the config file.
    pub fn api_base_url(&self) -> String {
        std::env::var(API_BASE_URL_ENV)
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.api_base_url.clone())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        }
    }

    /// Countdown window for the resend control. Zero falls back to the default.
    pub fn resend_window(&self) -> Duration {
        let secs = if self.resend_window_secs == 0 {
            Self::DEFAULT_RESEND_WINDOW_SECS
        } else {
            self.resend_window_secs
        };
        Duration::from_secs(secs)
    }

    /// Saves only the `api_base_url` field to the config file.
    pub fn save_api_base_url(url: &str) -> Result<()> {
        Self::save_api_base_url_to(&paths::config_path(), url)
    }

    /// Saves only the `api_base_url` field to a specific config file path.
    ///
    /// Creates the file with default template if it doesn't exist.
    /// If file exists, merges user values into the latest template.
    pub fn save_api_base_url_to(path: &Path, url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let parsed = url::Url::parse(url).with_context(|| format!("Invalid base URL: {url}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("Base URL must use http or https: {url}");
        }

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["api_base_url"] = value(url.trim_end_matches('/'));

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            resend_window_secs: Self::DEFAULT_RESEND_WINDOW_SECS,
            log_filter: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.resend_window(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "resend_window_secs = 45\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.resend_window_secs, 45);
        assert_eq!(config.api_base_url, Config::DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_zero_window_falls_back_to_default() {
        let config = Config {
            resend_window_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.resend_window(), Duration::from_secs(30));
    }

    #[test]
    fn test_zero_timeout_disables_timeout() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), None);
        assert_eq!(
            Config::default().request_timeout(),
            Some(Duration::from_secs(15))
        );
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("api_base_url ="));
        assert!(contents.contains("# log_filter ="));

        let loaded = Config::load_from(&config_path).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "# existing").unwrap();

        let err = Config::init(&config_path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_save_base_url_preserves_other_values_and_comments() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "resend_window_secs = 10\n").unwrap();

        Config::save_api_base_url_to(&config_path, "http://localhost:4000/").unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# Seconds before"));
        let loaded = Config::load_from(&config_path).unwrap();
        assert_eq!(loaded.api_base_url, "http://localhost:4000");
        assert_eq!(loaded.resend_window_secs, 10);
    }

    #[test]
    fn test_save_base_url_rejects_invalid_url() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        assert!(Config::save_api_base_url_to(&config_path, "not a url").is_err());
        assert!(Config::save_api_base_url_to(&config_path, "ftp://example.com").is_err());
        assert!(!config_path.exists());
    }
}
