//! Named logger registry and fan-out dispatcher.
//!
//! ## Entry lifecycle
//!
//! ```text
//! register_logger ──► Registered (enabled=false, initialized=false)
//!                          │ init_logger
//!                          ▼
//!                     Initialized (enabled=true) ◄──► Disabled (enable_logger)
//!                          │ unregister_logger (backend closed)
//!                          ▼
//!                     Unregistered
//! ```
//!
//! ## Locking
//!
//! The table sits behind one `RwLock`. Fan-out, `get_logger` and `close`
//! only enumerate it and take the shared lock; every other operation takes
//! the exclusive lock. Backends guard their own state, so emitting never
//! needs the exclusive lock.

use std::collections::HashMap;
use std::fmt::{self, Arguments};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::backend::{ConsoleBackend, LogBackend, Record};
use crate::config::{LoggerConfig, LoggingConfig, SOURCE_AUTO};
use crate::context::LogContext;
use crate::error::{LogError, LogResult};
use crate::level::Level;

/// Well-known name of the console backend.
pub const CONSOLE: &str = "console";

/// One registry entry.
struct LogInstance {
    backend: Arc<dyn LogBackend>,
    enabled: bool,
    initialized: bool,
    source: String,
}

/// Snapshot of an entry's enablement state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerState {
    /// Whether fan-out reaches this backend
    pub enabled: bool,
    /// Whether the backend was ever initialized
    pub initialized: bool,
    /// Source tag recorded at initialization ("" for explicit init)
    pub source: String,
}

/// Outcome of [`Registry::reopen`].
///
/// Every enabled backend is attempted; failures are collected rather than
/// stopping the pass. The `Display` text concatenates one line per failure
/// and is the empty string when every backend reopened.
#[derive(Debug, Default)]
pub struct ReopenReport {
    failures: Vec<LogError>,
}

impl ReopenReport {
    /// True when no backend failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Per-backend failures, each a [`LogError::Reopen`].
    pub fn failures(&self) -> &[LogError] {
        &self.failures
    }

    /// Convert into a `Result`, keeping the report as the error.
    pub fn into_result(self) -> Result<(), ReopenReport> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ReopenReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in &self.failures {
            writeln!(f, "{}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for ReopenReport {}

/// Process-lifetime table of named logger backends.
///
/// Most programs use the shared instance returned by
/// [`global`](crate::global); separate registries are useful in tests and
/// for embedding.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use clog_core::{LogContext, LoggerConfig, MemoryBackend, Registry};
///
/// let registry = Registry::new();
/// let memory = Arc::new(MemoryBackend::new());
/// registry.register_logger("memory", memory.clone()).unwrap();
/// registry
///     .init_logger("memory", Some(&LoggerConfig::new("info").with_service("svc")))
///     .unwrap();
///
/// let ctx = LogContext::with_trace_id("t1");
/// registry.info(Some(&ctx), format_args!("x={}", 5));
/// assert_eq!(memory.lines(), vec!["[INFO] [svc] [t1] x=5".to_string()]);
/// ```
#[derive(Default)]
pub struct Registry {
    loggers: RwLock<HashMap<String, LogInstance>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the console backend registered and
    /// initialized at debug level, tagged as auto-injected.
    ///
    /// The console entry is silenced the first time
    /// [`init_logger`](Self::init_logger) succeeds for any backend.
    pub fn with_auto_console() -> Self {
        Self::with_auto_logger(CONSOLE, Arc::new(ConsoleBackend::new()))
    }

    /// Like [`with_auto_console`](Self::with_auto_console) with any backend.
    pub fn with_auto_logger(name: &str, backend: Arc<dyn LogBackend>) -> Self {
        let registry = Self::new();
        let config = LoggerConfig::new(Level::Debug.name());

        let bootstrap = registry
            .register_logger(name, backend)
            .and_then(|()| registry.init_logger_with_source(name, Some(&config), SOURCE_AUTO));
        if let Err(e) = bootstrap {
            tracing::warn!(logger = %name, error = %e, "Auto logger bootstrap failed");
        }

        registry
    }

    /// Register `backend` under `name`. The entry starts disabled and
    /// uninitialized.
    pub fn register_logger(&self, name: &str, backend: Arc<dyn LogBackend>) -> LogResult<()> {
        let mut loggers = self.loggers.write();

        if loggers.contains_key(name) {
            return Err(LogError::DuplicateName(name.to_string()));
        }

        loggers.insert(
            name.to_string(),
            LogInstance {
                backend,
                enabled: false,
                initialized: false,
                source: String::new(),
            },
        );

        tracing::debug!(logger = %name, "Registered logger");
        Ok(())
    }

    /// Initialize `name` with `config` and enable it.
    ///
    /// On success every other enabled entry whose source is `"auto"` is
    /// disabled, so the zero-configuration console logger goes quiet once a
    /// real logger is configured.
    pub fn init_logger(&self, name: &str, config: Option<&LoggerConfig>) -> LogResult<()> {
        let mut loggers = self.loggers.write();

        init_entry(&mut loggers, name, config, "")?;

        for (other, instance) in loggers.iter_mut() {
            if other != name && instance.enabled && instance.source == SOURCE_AUTO {
                instance.enabled = false;
                tracing::debug!(logger = %other, by = %name, "Silenced auto logger");
            }
        }

        Ok(())
    }

    /// Initialize `name` recording `source`, without silencing auto loggers.
    ///
    /// Used for bootstrap entries such as the auto console logger.
    pub fn init_logger_with_source(
        &self,
        name: &str,
        config: Option<&LoggerConfig>,
        source: &str,
    ) -> LogResult<()> {
        let mut loggers = self.loggers.write();
        init_entry(&mut loggers, name, config, source)
    }

    /// Initialize every logger in `config`, in name order.
    ///
    /// Stops at the first failure; loggers initialized before it stay
    /// initialized.
    pub fn apply_config(&self, config: &LoggingConfig) -> LogResult<()> {
        for (name, logger) in &config.loggers {
            self.init_logger(name, Some(logger))?;
        }
        Ok(())
    }

    /// Enable or disable `name`. An entry that was never initialized stays
    /// disabled whatever `enable` says.
    pub fn enable_logger(&self, name: &str, enable: bool) -> LogResult<()> {
        let mut loggers = self.loggers.write();
        let instance = loggers
            .get_mut(name)
            .ok_or_else(|| LogError::NotFound(name.to_string()))?;

        instance.enabled = instance.initialized && enable;
        Ok(())
    }

    /// Backend registered under `name`.
    pub fn get_logger(&self, name: &str) -> LogResult<Arc<dyn LogBackend>> {
        self.loggers
            .read()
            .get(name)
            .map(|instance| Arc::clone(&instance.backend))
            .ok_or_else(|| LogError::NotFound(name.to_string()))
    }

    /// Enablement snapshot of `name`.
    pub fn entry_state(&self, name: &str) -> LogResult<LoggerState> {
        self.loggers
            .read()
            .get(name)
            .map(|instance| LoggerState {
                enabled: instance.enabled,
                initialized: instance.initialized,
                source: instance.source.clone(),
            })
            .ok_or_else(|| LogError::NotFound(name.to_string()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Close the backend under `name` and remove the entry.
    pub fn unregister_logger(&self, name: &str) -> LogResult<()> {
        let instance = self
            .loggers
            .write()
            .remove(name)
            .ok_or_else(|| LogError::NotFound(name.to_string()))?;

        instance.backend.close();
        tracing::debug!(logger = %name, "Unregistered logger");
        Ok(())
    }

    /// Reopen every enabled backend, collecting failures.
    pub fn reopen(&self) -> ReopenReport {
        let loggers = self.loggers.write();
        let mut report = ReopenReport::default();

        for (name, instance) in loggers.iter() {
            if !instance.enabled {
                continue;
            }

            if let Err(e) = instance.backend.reopen() {
                tracing::warn!(logger = %name, error = %e, "Logger reopen failed");
                report.failures.push(LogError::Reopen {
                    name: name.clone(),
                    reason: e.to_string(),
                });
            }
        }

        report
    }

    /// Set the threshold of every enabled backend.
    pub fn set_level_all(&self, level: &str) {
        let loggers = self.loggers.write();
        for instance in loggers.values().filter(|i| i.enabled) {
            instance.backend.set_level(level);
        }
    }

    /// Set the threshold of `name`, enabled or not.
    pub fn set_level(&self, name: &str, level: &str) -> LogResult<()> {
        let loggers = self.loggers.write();
        let instance = loggers
            .get(name)
            .ok_or_else(|| LogError::NotFound(name.to_string()))?;

        instance.backend.set_level(level);
        Ok(())
    }

    /// Close every enabled backend. Entries stay registered.
    pub fn close(&self) {
        let loggers = self.loggers.read();
        for instance in loggers.values().filter(|i| i.enabled) {
            instance.backend.close();
        }
    }

    /// Close and remove every entry.
    pub fn shutdown(&self) {
        let drained: Vec<(String, LogInstance)> = self.loggers.write().drain().collect();
        for (name, instance) in drained {
            instance.backend.close();
            tracing::debug!(logger = %name, "Closed logger on shutdown");
        }
    }

    /// Forward a prepared record to every enabled backend.
    pub fn log(&self, record: &Record<'_>) {
        self.dispatch(record);
    }

    /// Log at fatal level on every enabled backend. Never terminates.
    #[inline(never)]
    pub fn fatal(&self, ctx: Option<&LogContext>, args: Arguments<'_>) {
        self.dispatch(&Record::new(Level::Fatal, ctx, args));
    }

    /// Log at warn level on every enabled backend.
    #[inline(never)]
    pub fn warn(&self, ctx: Option<&LogContext>, args: Arguments<'_>) {
        self.dispatch(&Record::new(Level::Warn, ctx, args));
    }

    /// Log at info level on every enabled backend.
    #[inline(never)]
    pub fn info(&self, ctx: Option<&LogContext>, args: Arguments<'_>) {
        self.dispatch(&Record::new(Level::Info, ctx, args));
    }

    /// Log at debug level on every enabled backend.
    #[inline(never)]
    pub fn debug(&self, ctx: Option<&LogContext>, args: Arguments<'_>) {
        self.dispatch(&Record::new(Level::Debug, ctx, args));
    }

    #[inline(never)]
    fn dispatch(&self, record: &Record<'_>) {
        let loggers = self.loggers.read();
        for instance in loggers.values() {
            if instance.enabled {
                instance.backend.log(record);
            }
        }
    }
}

/// Shared body of the two init entry points. Caller holds the write lock.
fn init_entry(
    loggers: &mut HashMap<String, LogInstance>,
    name: &str,
    config: Option<&LoggerConfig>,
    source: &str,
) -> LogResult<()> {
    let instance = loggers
        .get_mut(name)
        .ok_or_else(|| LogError::NotFound(name.to_string()))?;

    instance.backend.init(config)?;

    instance.source = source.to_string();
    instance.enabled = true;
    instance.initialized = true;

    tracing::debug!(logger = %name, source = %source, "Initialized logger");
    Ok(())
}
