//! Configuration management for the sortd server.
//!
//! Sources, lowest precedence first:
//! 1. Default values
//! 2. Configuration file (YAML)
//! 3. Environment variables (`SORTD_` prefix)
//!
//! The CLI applies its own flags on top of the loaded config.
//!
//! # Example
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//!   body_limit_bytes: 16777216
//! batch:
//!   workers: 0
//!   order: completion
//! logging:
//!   level: info
//!   json: false
//! ```

use serde::{Deserialize, Serialize};
use sortd_batch::{BatchConfig, ResultOrder};
use sortd_observability::LogConfig;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use crate::server::ServeError;

/// Server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listener settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Batch worker pool settings
    #[serde(default)]
    pub batch: BatchConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LogConfig,
}

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit() -> usize {
    16 * 1024 * 1024
}

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnv { var: &'static str, reason: String },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

impl ServerConfig {
    /// Load configuration from a YAML file with environment variable overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&content)?;
        config.apply_env(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from defaults plus environment variables.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let mut config = Self::default();
        config.apply_env(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document. Missing sections and fields take defaults; an
    /// empty document yields the default config.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigLoadError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply `SORTD_*` overrides using `lookup` to read variables.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `SORTD_HOST` | `server.host` |
    /// | `SORTD_PORT` | `server.port` |
    /// | `SORTD_BODY_LIMIT_BYTES` | `server.body_limit_bytes` |
    /// | `SORTD_BATCH_WORKERS` | `batch.workers` |
    /// | `SORTD_BATCH_ORDER` | `batch.order` |
    /// | `SORTD_LOG_LEVEL` | `logging.level` |
    /// | `SORTD_LOG_JSON` | `logging.json` |
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SORTD_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SORTD_PORT") {
            self.server.port = parse_env("SORTD_PORT", &port)?;
        }
        if let Some(limit) = lookup("SORTD_BODY_LIMIT_BYTES") {
            self.server.body_limit_bytes = parse_env("SORTD_BODY_LIMIT_BYTES", &limit)?;
        }
        if let Some(workers) = lookup("SORTD_BATCH_WORKERS") {
            self.batch.workers = parse_env("SORTD_BATCH_WORKERS", &workers)?;
        }
        if let Some(order) = lookup("SORTD_BATCH_ORDER") {
            self.batch.order = order
                .parse::<ResultOrder>()
                .map_err(|reason| ConfigLoadError::InvalidEnv {
                    var: "SORTD_BATCH_ORDER",
                    reason,
                })?;
        }
        if let Some(level) = lookup("SORTD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = lookup("SORTD_LOG_JSON") {
            self.logging.json = parse_env("SORTD_LOG_JSON", &json)?;
        }
        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.server.body_limit_bytes == 0 {
            return Err(ConfigLoadError::Invalid {
                message: "server.body_limit_bytes must be greater than 0".to_string(),
            });
        }

        if !LogConfig::is_valid_level(&self.logging.level) {
            return Err(ConfigLoadError::Invalid {
                message: format!(
                    "logging.level must be one of: {:?}, got: {}",
                    sortd_observability::tracing_setup::LOG_LEVELS,
                    self.logging.level
                ),
            });
        }

        for (component, level) in &self.logging.components {
            if !LogConfig::is_valid_level(level) {
                return Err(ConfigLoadError::Invalid {
                    message: format!("logging.components.{component}: unknown level '{level}'"),
                });
            }
        }

        Ok(())
    }

    /// The address to listen on.
    pub fn socket_addr(&self) -> Result<SocketAddr, ServeError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|e: std::net::AddrParseError| ServeError::InvalidAddress {
            addr,
            reason: e.to_string(),
        })
    }
}

fn parse_env<T>(var: &'static str, value: &str) -> Result<T, ConfigLoadError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigLoadError::InvalidEnv {
            var,
            reason: format!("'{value}': {e}"),
        })
}
