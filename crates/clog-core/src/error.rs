//! Error types for the clog logging facility

use thiserror::Error;

/// Main error type for registry and backend setup operations.
///
/// Emission never produces one of these: the log verbs swallow every
/// failure. Only setup-time calls (register, init, enable, reopen, ...)
/// report errors to the caller.
#[derive(Error, Debug)]
pub enum LogError {
    /// No logger is registered under the name
    #[error("not found logger: {0}")]
    NotFound(String),

    /// A logger is already registered under the name
    #[error("duplicate logger: {0}")]
    DuplicateName(String),

    /// Backend initialization was attempted without a usable config
    #[error("invalid logger config: {0}")]
    InvalidConfig(String),

    /// The host name could not be resolved during initialization
    #[error("host resolution failed: {0}")]
    HostResolution(#[source] std::io::Error),

    /// A backend failed to reopen its sink
    #[error("logger: {name} reopen failed, err: {reason}")]
    Reopen {
        /// Registry name of the failing backend
        name: String,
        /// Backend-provided failure text
        reason: String,
    },

    /// Strict level parsing rejected the input
    #[error("invalid level: {0}")]
    InvalidLevel(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration document could not be parsed
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type alias using LogError
pub type LogResult<T> = Result<T, LogError>;
