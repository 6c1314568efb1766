//! Scrape configuration loaded from a JSON or YAML file.
//!
//! ```json
//! {
//!   "url": "https://example.com/podcast",
//!   "result_folder": "./results",
//!   "selectors": {
//!     "article": ".episode",
//!     "title": "h2",
//!     "segment": "//div[contains(@class, 'line')]",
//!     "author": ".speaker",
//!     "citation": ".quote"
//!   }
//! }
//! ```
//!
//! Files ending in `.yaml` or `.yml` are read as YAML, anything else as JSON.

use crate::models::{DEFAULT_UNKNOWN_AUTHOR, SelectorSet};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument};
use url::Url;

/// User-Agent sent by the static fetcher and the browser unless overridden.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid url `{url}`: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Top-level scrape configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Page to scrape.
    pub url: String,
    /// Directory that receives one `.txt` file per article.
    #[serde(default = "default_result_folder", alias = "resultFolder")]
    pub result_folder: PathBuf,
    pub selectors: SelectorSet,
    /// Author used for segments before any speaker is known.
    #[serde(default = "default_unknown_author")]
    pub unknown_author: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Settings for the browser-rendered fetch path.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub webdriver_url: String,
    pub headless: bool,
    /// Upper bound on waiting for the first article to appear.
    pub wait_timeout_secs: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
            wait_timeout_secs: 30,
        }
    }
}

fn default_result_folder() -> PathBuf {
    PathBuf::from("./results")
}

fn default_unknown_author() -> String {
    DEFAULT_UNKNOWN_AUTHOR.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Config {
    /// Parse config text; `yaml` selects the YAML parser.
    pub fn parse(text: &str, yaml: bool) -> Result<Self, ConfigError> {
        let config: Config = if yaml {
            serde_yaml::from_str(text)?
        } else {
            serde_json::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load and validate the config file at `path`.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml" | "yml")
        );
        let config = Self::parse(&text, yaml)?;
        info!(url = %config.url, result_folder = %config.result_folder.display(), "Loaded configuration");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.url).map_err(|source| ConfigError::Url {
            url: self.url.clone(),
            source,
        })?;
        Ok(())
    }
}
