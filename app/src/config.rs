//! Configuration: an optional TOML file, then environment variable overrides.
//!
//! Looks for `wunderview.toml` in the working directory, or at the path in
//! `WUNDERVIEW_CONFIG`. The file is optional; environment variables take
//! precedence over file values. Credentials have no default and must come
//! from one of the two sources.

use std::path::Path;

use serde::Deserialize;
use wunderlist_core::TransportConfig;

pub const DEFAULT_CONFIG_PATH: &str = "wunderview.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote API address and credentials.
    pub api: TransportConfig,
    /// The list to render.
    pub list: ListConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Which list to fetch.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Kept as text: a non-numeric value is reported by the client.
    pub id: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "wunderview=info,wunderlist_core=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is malformed, or if the
    /// credentials are missing once every source has been applied.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("WUNDERVIEW_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("WUNDERLIST_BASE_URL") {
            self.api.base_url = val;
        }
        if let Some(val) = var("WUNDERLIST_CLIENT_ID") {
            self.api.client_id = val;
        }
        if let Some(val) = var("WUNDERLIST_ACCESS_TOKEN") {
            self.api.access_token = val;
        }
        if let Some(val) = var("WUNDERLIST_LIST_ID") {
            self.list.id = val;
        }
        if let Some(val) = var("WUNDERVIEW_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.client_id.trim().is_empty() {
            return Err(ConfigError::Validation("client id is required".to_string()));
        }
        if self.api.access_token.trim().is_empty() {
            return Err(ConfigError::Validation("access token is required".to_string()));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
