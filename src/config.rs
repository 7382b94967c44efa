// src/config.rs

//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Output and persistence settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.workers == 0 {
            return Err(AppError::validation("crawler.workers must be > 0"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Worker pool size
    #[serde(default = "defaults::workers")]
    pub workers: usize,

    /// Maximum crawl depth; seeds are depth 0 and pages at the
    /// bound are fetched but not expanded
    #[serde(default = "defaults::max_depth")]
    pub max_depth: usize,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            workers: defaults::workers(),
            max_depth: defaults::max_depth(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Output and persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for fetched pages and the crawl manifest
    #[serde(default = "defaults::output_dir")]
    pub dir: PathBuf,

    /// Write manifest.json after the crawl completes
    #[serde(default = "defaults::write_manifest")]
    pub write_manifest: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            write_manifest: defaults::write_manifest(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn workers() -> usize {
        5
    }

    pub fn max_depth() -> usize {
        3
    }

    pub fn user_agent() -> String {
        "webcrawl/0.1".to_string()
    }

    pub fn timeout() -> u64 {
        10
    }

    pub fn output_dir() -> PathBuf {
        PathBuf::from("fetched")
    }

    pub fn write_manifest() -> bool {
        true
    }
}
