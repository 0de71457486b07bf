//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching the
//! config/default.toml structure.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::alpha_vantage::AlphaVantageConfig;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub alpha_vantage: AlphaVantageSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Alpha Vantage API configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct AlphaVantageSection {
    /// Query endpoint base URL
    pub base_url: String,
    /// API key; may be left empty and supplied via ALPHA_VANTAGE_API_KEY
    #[serde(default)]
    pub api_key: Option<String>,
    /// Provider function identifier for the daily series
    pub daily_function: String,
    /// Provider function identifier for the intraday series
    pub intraday_function: String,
    /// Intraday bar interval
    #[serde(default = "default_interval")]
    pub intraday_interval: String,
    /// Transport-level request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_interval() -> String {
    "1min".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl AlphaVantageSection {
    /// Get API key with environment variable fallback.
    /// Checks ALPHA_VANTAGE_API_KEY if the config value is empty/None.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var("ALPHA_VANTAGE_API_KEY").ok()
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alpha_vantage.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "base_url cannot be empty".to_string(),
            ));
        }

        if self.alpha_vantage.daily_function.is_empty() {
            return Err(ConfigError::ValidationError(
                "daily_function cannot be empty".to_string(),
            ));
        }

        if self.alpha_vantage.intraday_function.is_empty() {
            return Err(ConfigError::ValidationError(
                "intraday_function cannot be empty".to_string(),
            ));
        }

        if self.alpha_vantage.intraday_interval.is_empty() {
            return Err(ConfigError::ValidationError(
                "intraday_interval cannot be empty".to_string(),
            ));
        }

        if self.alpha_vantage.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(format!(
                "timeout_secs must be > 0, got {}",
                self.alpha_vantage.timeout_secs
            )));
        }

        Ok(())
    }
}

// Conversion from the config file section to the adapter's constructor
// config; the adapter itself never reads files or environment variables.
impl From<&Config> for AlphaVantageConfig {
    fn from(config: &Config) -> Self {
        AlphaVantageConfig {
            base_url: config.alpha_vantage.base_url.clone(),
            api_key: config.alpha_vantage.get_api_key().unwrap_or_default(),
            daily_function: config.alpha_vantage.daily_function.clone(),
            intraday_function: config.alpha_vantage.intraday_function.clone(),
            intraday_interval: config.alpha_vantage.intraday_interval.clone(),
            timeout: Duration::from_secs(config.alpha_vantage.timeout_secs),
        }
    }
}
