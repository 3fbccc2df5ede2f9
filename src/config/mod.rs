mod env;
mod validation;

use env::{load_env_string, load_env_string_opt, load_env_var};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Environment error: {0}")]
    EnvError(String),
}

/// Verbosity for the process-local tracing subscriber. Distinct from the
/// open `level` string carried on shipped log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Log-aggregation backend settings.
///
/// An absent `url` turns the shipper into a no-op: every push returns
/// immediately and nothing is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LokiConfig {
    /// Push endpoint URL; absent disables shipping entirely
    pub url: Option<String>,
    /// Tenant id sent as the X-Scope-OrgID header
    pub tenant: String,
    /// Comma-separated `key=value` pairs merged into every label set
    pub static_labels: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LokiConfig {
    fn default() -> Self {
        Self {
            url: None,
            tenant: "default".to_string(),
            static_labels: "env=production".to_string(),
            timeout_secs: 2,
        }
    }
}

impl LokiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Process configuration, resolved once at startup and immutable afterwards.
/// Call logic never reads ambient environment state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Intent classifier endpoint URL; absent means classify always falls back
    pub intent_url: Option<String>,
    /// Menu backend endpoint URL; absent means fetch always returns empty
    pub menu_url: Option<String>,
    /// Intent request timeout in seconds
    pub intent_timeout_secs: u64,
    /// Menu request timeout in seconds
    pub menu_timeout_secs: u64,
    /// Log-aggregation backend settings
    pub loki: LokiConfig,
    /// Local tracing verbosity
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            intent_url: None,
            menu_url: None,
            intent_timeout_secs: 5,
            menu_timeout_secs: 5,
            loki: LokiConfig::default(),
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Load configuration from individual environment variables, keeping the
    /// default for any variable that is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        load_env_string_opt("INTENT_SERVICE_URL", &mut config.intent_url);
        load_env_string_opt("MENU_SERVICE_URL", &mut config.menu_url);
        load_env_var("INTENT_TIMEOUT_SECS", &mut config.intent_timeout_secs)?;
        load_env_var("MENU_TIMEOUT_SECS", &mut config.menu_timeout_secs)?;

        load_env_string_opt("LOKI_URL", &mut config.loki.url);
        load_env_string("LOKI_TENANT", &mut config.loki.tenant);
        load_env_string("LOKI_LABELS", &mut config.loki.static_labels);
        load_env_var("LOKI_TIMEOUT_SECS", &mut config.loki.timeout_secs)?;

        // LogLevel requires special handling for case-insensitive parsing
        if let Ok(log_level) = std::env::var("LOG_LEVEL") {
            config.log_level = match log_level.to_lowercase().as_str() {
                "error" => LogLevel::Error,
                "warn" => LogLevel::Warn,
                "info" => LogLevel::Info,
                "debug" => LogLevel::Debug,
                "trace" => LogLevel::Trace,
                _ => {
                    return Err(ConfigError::EnvError(format!(
                        "Invalid LOG_LEVEL: {log_level}"
                    )));
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn intent_timeout(&self) -> Duration {
        Duration::from_secs(self.intent_timeout_secs)
    }

    pub fn menu_timeout(&self) -> Duration {
        Duration::from_secs(self.menu_timeout_secs)
    }
}
