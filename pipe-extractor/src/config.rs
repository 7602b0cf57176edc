use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::localization::{ContentCountry, Localization};

/// Extractor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extractor: ExtractorConfig,
    pub downloader: DownloaderConfig,
    pub logging: LoggingConfig,
}

/// Preferred localization and content country
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Localization code, e.g. "en-GB" or "pt_BR"
    pub localization: String,
    /// ISO 3166 country code
    pub content_country: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            localization: "en-GB".to_string(),
            content_country: "GB".to_string(),
        }
    }
}

/// HTTP downloader settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloaderConfig {
    pub user_agent: String,
    pub connect_timeout_seconds: u64,
    pub timeout_seconds: u64,
    /// Upper bound on a response body, in bytes
    pub max_response_size: usize,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; rv:128.0) Gecko/20100101 Firefox/128.0"
                .to_string(),
            connect_timeout_seconds: 10,
            timeout_seconds: 30,
            max_response_size: 16 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for this crate's own events
    pub level: String,
    /// Level for everything else, e.g. reqwest and hyper
    pub dependency_level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dependency_level: "warn".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. Config file (if provided)
    /// 3. Defaults (lowest priority)
    pub fn load(config_file: Option<&str>) -> std::result::Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            }
        }

        // PIPE_EXTRACTOR_EXTRACTOR__LOCALIZATION, PIPE_EXTRACTOR_LOGGING__LEVEL, ...
        builder = builder.add_source(
            Environment::with_prefix("PIPE_EXTRACTOR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load from environment variables only
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from file path
    pub fn from_file(path: &str) -> std::result::Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    /// Parsed preferred localization
    pub fn localization(&self) -> Result<Localization> {
        Localization::from_localization_code(&self.extractor.localization)
    }

    /// Parsed preferred content country
    #[must_use]
    pub fn content_country(&self) -> ContentCountry {
        ContentCountry::new(&self.extractor.content_country)
    }
}
