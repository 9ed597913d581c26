//! Application configuration parsing and validation.
//!
//! # Responsibility
//! - Parse the small JSON app config selecting a storage backend and
//!   logging settings.
//! - Validate declaratively before any component consumes the values.
//!
//! # Invariants
//! - Backend selection happens once here, never by branching at call sites.
//! - Unknown log levels and empty paths are rejected at parse time.

use crate::logging::normalize_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage backend selection for all store contracts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageBackend {
    /// Local persistent SQLite database at the given path.
    Sqlite { path: String },
    /// Ephemeral in-memory backend.
    Memory,
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::Memory
    }
}

/// Parsed and validated application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageBackend,
    #[serde(default = "default_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            log_level: default_level(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Parses configuration from a JSON document and validates it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates declaration-level configuration invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        normalize_level(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))?;
        if let StorageBackend::Sqlite { path } = &self.storage {
            if path.trim().is_empty() {
                return Err(ConfigError::EmptySqlitePath);
            }
        }
        Ok(())
    }
}

fn default_level() -> String {
    crate::logging::default_log_level().to_string()
}

/// Configuration parse/validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    InvalidLogLevel(String),
    EmptySqlitePath,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "cannot parse config: {message}"),
            Self::InvalidLogLevel(level) => write!(f, "unsupported log level `{level}`"),
            Self::EmptySqlitePath => write!(f, "sqlite backend requires a non-empty path"),
        }
    }
}

impl Error for ConfigError {}
