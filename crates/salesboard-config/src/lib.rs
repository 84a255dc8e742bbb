//! Configuration management for salesboard
//!
//! This module handles loading, validation, and management of
//! salesboard configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Where a loaded configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    File,
    Defaults,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Remote dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL of the JSON array of transactions
    #[serde(default = "default_source_url")]
    pub url: String,
    /// Upper bound on a single fetch, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_source_url() -> String {
    "https://s3.amazonaws.com/roxiler.com/product_transaction.json".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Records per page when `per_page` is not given
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
        }
    }
}

fn default_per_page() -> usize {
    10
}

/// Combined view settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedConfig {
    /// Fetch the dataset again before every combined response
    #[serde(default = "default_true")]
    pub reload_before_query: bool,
}

impl Default for CombinedConfig {
    fn default() -> Self {
        Self {
            reload_before_query: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Remote dataset settings
    #[serde(default)]
    pub source: SourceConfig,
    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Combined view settings
    #[serde(default)]
    pub combined: CombinedConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError {
                path: path.display().to_string(),
                source: e,
            },
        })?;

        Self::from_yaml(&content)
    }

    /// Load configuration, falling back to defaults when the file does not exist
    ///
    /// The returned origin tells the caller which one it got.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<(Self, ConfigOrigin), ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok((config, ConfigOrigin::File)),
            Err(ConfigError::FileNotFound { .. }) => Ok((Self::default(), ConfigOrigin::Defaults)),
            Err(e) => Err(e),
        }
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        let url = self.source.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "source.url".to_string(),
                reason: "URL must start with http:// or https://".to_string(),
            });
        }

        if self.source.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "source.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if self.pagination.per_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.per_page".to_string(),
                reason: "Records per page must be greater than 0".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Fetch timeout as a `Duration`
    pub fn source_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.source.timeout_secs)
    }
}

// ==================== Tests ====================
