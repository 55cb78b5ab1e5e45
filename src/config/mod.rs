//! Configuration management for the concursos service
//!
//! This module handles loading and validating configuration from defaults,
//! a TOML file, environment variables and command-line overrides, in that
//! order of precedence (later wins).

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Default source site for the listing pages
pub const DEFAULT_BASE_URL: &str = "https://concursosnobrasil.com";

/// Browser User-Agent sent with every listing request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Name echoed back as `desenvolvido_por` in every region response
pub const DEFAULT_DEVELOPER: &str = "Jeiel Miranda";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A field holds a value outside its allowed range
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// Config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("Failed to parse TOML config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Refresh cycle configuration
    pub refresh: RefreshConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_address: SocketAddr,

    /// Enable permissive CORS
    pub enable_cors: bool,

    /// Enable per-request tracing
    pub enable_request_logging: bool,

    /// Value of the `desenvolvido_por` response field
    pub developer: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8000)),
            enable_cors: true,
            enable_request_logging: true,
            developer: DEFAULT_DEVELOPER.to_string(),
        }
    }
}

/// Refresh cycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Seconds between the starts of two consecutive cycles
    pub interval_secs: u64,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Source site; listing pages live under `{base_url}/concursos/{uf}/`
    pub base_url: String,

    /// User agent string
    pub user_agent: String,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: 3600,
            request_timeout_secs: 30,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration: defaults or `path`, then environment overrides, then validation
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        let config = config.with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply `CONCURSOS_*` environment variables
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(addr) = std::env::var("CONCURSOS_BIND_ADDRESS") {
            self.server.bind_address = addr
                .parse()
                .map_err(|_| ConfigError::invalid("bind_address", format!("Invalid address: {addr}")))?;
        }

        if let Some(port) = env_number::<u16>("CONCURSOS_PORT", "port")? {
            self.server.bind_address.set_port(port);
        }

        if let Some(secs) = env_number::<u64>("CONCURSOS_REFRESH_INTERVAL_SECS", "interval_secs")? {
            self.refresh.interval_secs = secs;
        }

        if let Some(secs) =
            env_number::<u64>("CONCURSOS_REQUEST_TIMEOUT_SECS", "request_timeout_secs")?
        {
            self.refresh.request_timeout_secs = secs;
        }

        if let Ok(base_url) = std::env::var("CONCURSOS_BASE_URL") {
            self.refresh.base_url = base_url;
        }

        if let Ok(level) = std::env::var("CONCURSOS_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(format) = std::env::var("CONCURSOS_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh.interval_secs == 0 {
            return Err(ConfigError::invalid(
                "interval_secs",
                "Refresh interval must be greater than 0",
            ));
        }

        if self.refresh.request_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "request_timeout_secs",
                "Request timeout must be greater than 0",
            ));
        }

        let base = Url::parse(&self.refresh.base_url).map_err(|e| {
            ConfigError::invalid("base_url", format!("'{}': {e}", self.refresh.base_url))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "base_url",
                format!("Unsupported scheme '{}'", base.scheme()),
            ));
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::invalid(
                "format",
                format!("Expected 'text' or 'json', got '{}'", self.logging.format),
            ));
        }

        Ok(())
    }

    /// Get refresh interval as Duration
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh.interval_secs)
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.refresh.request_timeout_secs)
    }
}

fn env_number<T: std::str::FromStr>(var: &str, field: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::invalid(field, format!("{var}='{raw}' is not a number"))),
        Err(_) => Ok(None),
    }
}
