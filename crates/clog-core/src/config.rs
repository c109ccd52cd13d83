//! Logger configuration.
//!
//! A [`LoggerConfig`] is handed to a backend on initialization. A
//! [`LoggingConfig`] groups configs by registry name so a whole set of
//! loggers can be described in one JSON document:
//!
//! ```json
//! {
//!   "loggers": {
//!     "console": { "level": "warn", "service": "billing" }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LogResult;
use crate::level::Level;

/// Source tag reserved for the auto-registered default logger.
pub const SOURCE_AUTO: &str = "auto";

/// Configuration applied to one backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Threshold name; unrecognized names behave as "info"
    pub level: String,
    /// Free-text origin tag ("auto" is reserved)
    pub source: String,
    /// Service name printed in every line
    pub service: String,
    /// Caller frames to unwind for attribution, 0 keeps the backend default
    pub skip: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Info.name().to_string(),
            source: String::new(),
            service: String::new(),
            skip: 0,
        }
    }
}

impl LoggerConfig {
    /// Config with the given threshold and defaults elsewhere.
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Self::default()
        }
    }

    /// Set the service name.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    /// Set the source tag.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the caller frame skip.
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    /// Threshold this config resolves to.
    pub fn effective_level(&self) -> Level {
        Level::from_str_lossy(&self.level)
    }
}

/// A set of logger configs keyed by registry name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Ordered by name so initialization order is stable
    pub loggers: BTreeMap<String, LoggerConfig>,
}

impl LoggingConfig {
    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> LogResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> LogResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Add or replace one logger's config.
    pub fn with_logger(mut self, name: impl Into<String>, config: LoggerConfig) -> Self {
        self.loggers.insert(name.into(), config);
        self
    }
}
