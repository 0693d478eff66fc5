//! Runtime configuration
//!
//! Read from `~/.exhibit/config.yaml` when present, then overridden by
//! `EXHIBIT_*` environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_FILE_NAME, DATA_DIR_NAME, DEFAULT_API_URL, DEFAULT_LOG_FILE, DEFAULT_LOG_LEVEL,
    DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL every endpoint path is joined to
    pub api_url: String,
    pub page_size: u32,
    pub timeout_secs: u64,
    pub log_file: String,
    pub log_level: String,
    /// Where the session file lives. Not read from the file.
    #[serde(skip)]
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: String::from(DEFAULT_API_URL),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_file: String::from(DEFAULT_LOG_FILE),
            log_level: String::from(DEFAULT_LOG_LEVEL),
            data_dir: default_data_dir(),
        }
    }
}

/// `~/.exhibit`, or `./.exhibit` when there is no home directory
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}

impl Config {
    /// Load configuration from disk and the process environment
    pub fn load() -> Result<Self> {
        let data_dir = std::env::var("EXHIBIT_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        let mut config = Self::from_file(&data_dir.join(CONFIG_FILE_NAME))?;
        config.data_dir = data_dir;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read a config file; a missing file yields the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut config: Config = serde_yaml::from_str(content)?;
        config.normalize();
        Ok(config)
    }

    /// Apply `EXHIBIT_API_URL`, `EXHIBIT_PAGE_SIZE` and `EXHIBIT_LOG_LEVEL`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("EXHIBIT_API_URL").filter(|u| !u.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        if let Some(size) = lookup("EXHIBIT_PAGE_SIZE").and_then(|s| s.trim().parse::<u32>().ok()) {
            if size > 0 {
                self.page_size = size;
            }
        }
        if let Some(level) = lookup("EXHIBIT_LOG_LEVEL").filter(|l| !l.trim().is_empty()) {
            self.log_level = level.trim().to_string();
        }
    }

    fn normalize(&mut self) {
        if self.page_size == 0 {
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        if self.timeout_secs == 0 {
            self.timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::from_file(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = Config::from_yaml("api_url: https://exhibits.example.com/api\n").unwrap();
        assert_eq!(config.api_url, "https://exhibits.example.com/api");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_zero_page_size_normalized() {
        let config = Config::from_yaml("page_size: 0\n").unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "page_size: [not, a, number]\n").unwrap();
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("EXHIBIT_API_URL", "http://10.0.0.2:8080/api"),
            ("EXHIBIT_PAGE_SIZE", "25"),
            ("EXHIBIT_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_url, "http://10.0.0.2:8080/api");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_page_size_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|k| match k {
            "EXHIBIT_PAGE_SIZE" => Some("0".to_string()),
            _ => None,
        });
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);

        config.apply_overrides(|k| match k {
            "EXHIBIT_PAGE_SIZE" => Some("lots".to_string()),
            _ => None,
        });
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }
}
