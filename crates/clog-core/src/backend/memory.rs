//! In-memory backend.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::backend::{LogBackend, Record};
use crate::config::LoggerConfig;
use crate::error::{LogError, LogResult};
use crate::level::Level;

/// One record kept by a [`MemoryBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLine {
    /// Severity of the record
    pub level: Level,
    /// Service configured at the time of the record
    pub service: String,
    /// Rendered trace id, "" when absent
    pub trace_id: String,
    /// Formatted message
    pub message: String,
}

impl CapturedLine {
    /// `[LEVEL] [service] [trace] message`, uncolored.
    pub fn render(&self) -> String {
        format!(
            "[{}] [{}] [{}] {}",
            self.level.label(),
            self.service,
            self.trace_id,
            self.message
        )
    }
}

/// Logger that keeps every passing record in memory.
///
/// Useful for tests and for embedders that want to inspect what was
/// logged. Lines are kept until [`clear`](Self::clear) is called.
#[derive(Debug)]
pub struct MemoryBackend {
    level: AtomicU8,
    closed: AtomicBool,
    service: RwLock<String>,
    lines: Mutex<Vec<CapturedLine>>,
}

impl MemoryBackend {
    /// Empty backend at debug threshold.
    pub fn new() -> Self {
        Self {
            level: AtomicU8::new(Level::Debug as u8),
            closed: AtomicBool::new(false),
            service: RwLock::new(String::new()),
            lines: Mutex::new(Vec::new()),
        }
    }

    /// Current threshold.
    pub fn level(&self) -> Level {
        Level::from(self.level.load(Ordering::Relaxed))
    }

    /// Snapshot of captured records.
    pub fn entries(&self) -> Vec<CapturedLine> {
        self.lines.lock().clone()
    }

    /// Captured records rendered as text.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().iter().map(CapturedLine::render).collect()
    }

    /// Number of captured records.
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// Whether nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop captured records.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }

    /// Whether `close` has been called since the last `init`.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl LogBackend for MemoryBackend {
    fn init(&self, config: Option<&LoggerConfig>) -> LogResult<()> {
        let config = config.ok_or_else(|| {
            LogError::InvalidConfig("memory logger requires a config".to_string())
        })?;

        self.level
            .store(config.effective_level() as u8, Ordering::Relaxed);
        *self.service.write() = config.service.clone();
        self.closed.store(false, Ordering::Relaxed);
        Ok(())
    }

    fn set_level(&self, level: &str) {
        self.level
            .store(Level::from_str_lossy(level) as u8, Ordering::Relaxed);
    }

    fn set_skip(&self, _skip: usize) {
        // Lines carry no caller location
    }

    fn log(&self, record: &Record<'_>) {
        if !record.level.passes(self.level()) {
            return;
        }

        let line = CapturedLine {
            level: record.level,
            service: self.service.read().clone(),
            trace_id: record.trace_id(),
            message: record.message(),
        };
        self.lines.lock().push(line);
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Relaxed);
    }
}
