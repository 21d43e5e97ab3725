//! Configuration management.
//!
//! Settings come from a TOML file (`newswire.toml` in the working
//! directory or `config.toml` under the platform config directory)
//! layered under `NEWSWIRE_`-prefixed environment variables.
//!
//! ```toml
//! [api]
//! key = "your-api-key"
//! base_url = "https://newsapi.org/v2"
//! timeout_secs = 30
//!
//! [defaults]
//! page_size = 20
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Request defaults
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Upstream API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API key; also read from `NEWSWIRE_API_KEY`
    #[serde(default)]
    pub key: Option<String>,

    /// Base URL of the NewsAPI-compatible service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: std::env::var("NEWSWIRE_API_KEY").ok(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Request defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Articles per page when the query string does not say otherwise
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_base_url() -> String {
    crate::sources::DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    crate::models::DEFAULT_PAGE_SIZE
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &PathBuf) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .add_source(config::Environment::with_prefix("NEWSWIRE"))
        .build()?;

    settings.try_deserialize()
}

/// Get the default configuration (from env vars or defaults)
pub fn get_config() -> Config {
    Config::default()
}

/// Locate a configuration file in the default locations
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("newswire.toml");
    if local.is_file() {
        return Some(local);
    }

    let global = dirs::config_dir()?.join("newswire").join("config.toml");
    if global.is_file() {
        return Some(global);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://newsapi.org/v2");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.defaults.page_size, 20);
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let toml_content = r#"
[api]
key = "test-key"
base_url = "https://news.example.com/v2"
timeout_secs = 10

[defaults]
page_size = 50
"#;

        let mut file = File::create(&path).unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.api.key, Some("test-key".to_string()));
        assert_eq!(config.api.base_url, "https://news.example.com/v2");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.defaults.page_size, 50);
    }

    #[test]
    fn test_load_config_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "[api]\nkey = \"k\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.api.key, Some("k".to_string()));
        assert_eq!(config.api.base_url, "https://newsapi.org/v2");
        assert_eq!(config.defaults.page_size, 20);
    }

    #[test]
    fn test_load_config_nonexistent() {
        let path = PathBuf::from("/nonexistent/config.toml");
        assert!(load_config(&path).is_err());
    }
}
