//! Severity levels and their string names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LogError;

/// Ordered log severity.
///
/// `None` sits above every real severity, so a backend whose threshold is
/// `None` never emits anything.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Debugging information
    Debug = 0,
    /// General information
    #[default]
    Info = 1,
    /// Warning messages
    Warn = 2,
    /// Highest severity. Does not terminate the process.
    Fatal = 3,
    /// Disables emission
    None = 4,
}

impl Level {
    /// Every level in ascending order.
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Fatal,
        Level::None,
    ];

    /// Parse a level name, falling back to `Info` for anything unrecognized.
    ///
    /// Matching is case-insensitive and never fails.
    pub fn from_str_lossy(name: &str) -> Level {
        name.parse().unwrap_or(Level::Info)
    }

    /// Lowercase configuration name ("debug", "info", ...).
    pub fn name(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Fatal => "fatal",
            Level::None => "none",
        }
    }

    /// Uppercase label printed in log lines.
    pub fn label(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Fatal => "FATAL",
            Level::None => "NONE",
        }
    }

    /// Whether a message at `self` passes a backend configured at `threshold`.
    pub fn passes(self, threshold: Level) -> bool {
        self != Level::None && self >= threshold
    }

    /// Warn and above belong on the error stream.
    pub fn is_error_stream(self) -> bool {
        self >= Level::Warn
    }
}

impl From<u8> for Level {
    fn from(val: u8) -> Self {
        match val {
            0 => Level::Debug,
            1 => Level::Info,
            2 => Level::Warn,
            3 => Level::Fatal,
            _ => Level::None,
        }
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "fatal" => Ok(Level::Fatal),
            "none" => Ok(Level::None),
            _ => Err(LogError::InvalidLevel(s.to_string())),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Level::from_str_lossy(&name))
    }
}
