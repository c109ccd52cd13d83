//! clog core library
//!
//! A pluggable logging facility: a registry of named logger backends that
//! share one leveled-logging contract, plus a colorized console backend.
//!
//! ## Overview
//!
//! - **Backends** implement [`LogBackend`] (init, reopen, set level, set
//!   skip, the four log verbs, close). Each filters by its own threshold.
//! - The **[`Registry`]** maps names to backends with their enablement
//!   state and fans every log call out to the enabled ones.
//! - The **global registry** ([`global`]) starts with an auto-injected
//!   console logger at debug level, which is silenced the first time a real
//!   logger is initialized.
//!
//! ## Quick Start
//!
//! ```ignore
//! use clog_core::{info, warn, LogContext, LoggerConfig};
//!
//! fn main() -> Result<(), clog_core::LogError> {
//!     // Works before any setup: the auto console logger prints everything
//!     info!("booting");
//!
//!     // Explicit configuration replaces the auto logger
//!     clog_core::init_logger(
//!         clog_core::CONSOLE,
//!         Some(&LoggerConfig::new("warn").with_service("billing")),
//!     )?;
//!
//!     let ctx = LogContext::with_trace_id("req-42");
//!     warn!(ctx: &ctx, "card declined: {}", "insufficient funds");
//!
//!     clog_core::shutdown();
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod caller;
pub mod config;
pub mod context;
pub mod error;
mod global;
pub mod level;
mod macros;
pub mod registry;

// Re-exports
pub use backend::{
    Brush, CapturedLine, ConsoleBackend, HostResolver, LogBackend, MemoryBackend, Record,
    SharedWriter, TracingBackend,
};
pub use caller::CallSite;
pub use config::{LoggerConfig, LoggingConfig, SOURCE_AUTO};
pub use context::{LogContext, TraceId};
pub use error::{LogError, LogResult};
pub use global::{
    apply_config, close, enable_logger, get_logger, global, init_logger, register_logger, reopen,
    set_level, set_level_all, shutdown, unregister_logger,
};
pub use level::Level;
pub use registry::{LoggerState, Registry, ReopenReport, CONSOLE};
