use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the live scraper API.
    pub api_base: String,
    /// Static snapshot location: an http(s) URL base or a local directory.
    pub snapshot_base: String,
    /// Where the rendered page is written; `None` writes to stdout.
    pub output_path: Option<PathBuf>,
    /// Transport-level timeout for a single fetch.
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a set environment variable has an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: env_or_default("API_BASE_URL", "http://127.0.0.1:5000/api"),
            snapshot_base: env_or_default("SNAPSHOT_BASE", "."),
            output_path: optional_env("OUTPUT_PATH").map(PathBuf::from),
            request_timeout: Duration::from_secs(parse_env_u64("REQUEST_TIMEOUT_SECS", 30)?),
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "API_BASE_URL".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if let Err(e) = url::Url::parse(&self.api_base) {
            return Err(ConfigError::InvalidValue {
                name: "API_BASE_URL".to_string(),
                message: e.to_string(),
            });
        }
        if self.snapshot_base.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "SNAPSHOT_BASE".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "REQUEST_TIMEOUT_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// A configuration suitable for tests: no environment access, short timeout.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_base: "http://127.0.0.1:5000/api".to_string(),
            snapshot_base: ".".to_string(),
            output_path: None,
            request_timeout: Duration::from_secs(5),
        }
    }
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}
