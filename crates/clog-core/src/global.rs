//! Process-wide registry and the free-function API over it.
//!
//! The registry is created on first use with the console backend already
//! registered and initialized at debug level under [`CONSOLE`](crate::CONSOLE),
//! tagged as auto-injected. Logging therefore works with no setup at all,
//! and the console goes quiet the first time [`init_logger`] configures a
//! real logger.

use std::sync::{Arc, OnceLock};

use crate::backend::LogBackend;
use crate::config::{LoggerConfig, LoggingConfig};
use crate::error::LogResult;
use crate::registry::{Registry, ReopenReport};

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry.
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(Registry::with_auto_console)
}

/// Register a backend on the global registry.
pub fn register_logger(name: &str, backend: Arc<dyn LogBackend>) -> LogResult<()> {
    global().register_logger(name, backend)
}

/// Initialize a logger on the global registry, silencing auto loggers.
pub fn init_logger(name: &str, config: Option<&LoggerConfig>) -> LogResult<()> {
    global().init_logger(name, config)
}

/// Initialize every logger described by `config` on the global registry.
pub fn apply_config(config: &LoggingConfig) -> LogResult<()> {
    global().apply_config(config)
}

/// Enable or disable a logger on the global registry.
pub fn enable_logger(name: &str, enable: bool) -> LogResult<()> {
    global().enable_logger(name, enable)
}

/// Look up a backend on the global registry.
pub fn get_logger(name: &str) -> LogResult<Arc<dyn LogBackend>> {
    global().get_logger(name)
}

/// Close and remove a logger from the global registry.
pub fn unregister_logger(name: &str) -> LogResult<()> {
    global().unregister_logger(name)
}

/// Reopen every enabled logger on the global registry.
pub fn reopen() -> ReopenReport {
    global().reopen()
}

/// Set the threshold of every enabled logger on the global registry.
pub fn set_level_all(level: &str) {
    global().set_level_all(level)
}

/// Set the threshold of one logger on the global registry.
pub fn set_level(name: &str, level: &str) -> LogResult<()> {
    global().set_level(name, level)
}

/// Close every enabled logger on the global registry.
pub fn close() {
    global().close()
}

/// Close and remove every logger; call once at process teardown.
pub fn shutdown() {
    global().shutdown()
}
