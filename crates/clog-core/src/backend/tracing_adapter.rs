//! Tracing library adapter backend.

use std::sync::atomic::{AtomicU8, Ordering};

use parking_lot::RwLock;

use crate::backend::{LogBackend, Record};
use crate::config::LoggerConfig;
use crate::error::{LogError, LogResult};
use crate::level::Level;

/// Backend that re-emits records as `tracing` events.
///
/// Lets an application that already runs a `tracing-subscriber` stack
/// receive clog output through it. Fatal maps to `ERROR`.
///
/// ```ignore
/// use std::sync::Arc;
/// use clog_core::{LoggerConfig, Registry, TracingBackend};
///
/// let registry = Registry::new();
/// registry.register_logger("tracing", Arc::new(TracingBackend::new()))?;
/// registry.init_logger("tracing", Some(&LoggerConfig::new("info")))?;
/// ```
#[derive(Debug)]
pub struct TracingBackend {
    level: AtomicU8,
    service: RwLock<String>,
}

impl TracingBackend {
    /// Create a new tracing adapter at debug threshold.
    pub fn new() -> Self {
        Self {
            level: AtomicU8::new(Level::Debug as u8),
            service: RwLock::new(String::new()),
        }
    }

    /// Current threshold.
    pub fn level(&self) -> Level {
        Level::from(self.level.load(Ordering::Relaxed))
    }
}

impl Default for TracingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl LogBackend for TracingBackend {
    fn init(&self, config: Option<&LoggerConfig>) -> LogResult<()> {
        let config = config.ok_or_else(|| {
            LogError::InvalidConfig("tracing logger requires a config".to_string())
        })?;

        self.level
            .store(config.effective_level() as u8, Ordering::Relaxed);
        *self.service.write() = config.service.clone();
        Ok(())
    }

    fn set_level(&self, level: &str) {
        self.level
            .store(Level::from_str_lossy(level) as u8, Ordering::Relaxed);
    }

    fn set_skip(&self, _skip: usize) {
        // tracing records its own callsite metadata
    }

    fn log(&self, record: &Record<'_>) {
        if !record.level.passes(self.level()) {
            return;
        }

        let service = self.service.read().clone();
        let trace_id = record.trace_id();
        let message = record.message();

        match record.level {
            Level::Debug => {
                tracing::debug!(service = %service, trace_id = %trace_id, "{}", message)
            }
            Level::Info => tracing::info!(service = %service, trace_id = %trace_id, "{}", message),
            Level::Warn => tracing::warn!(service = %service, trace_id = %trace_id, "{}", message),
            Level::Fatal => {
                tracing::error!(service = %service, trace_id = %trace_id, "{}", message)
            }
            Level::None => {}
        }
    }
}
