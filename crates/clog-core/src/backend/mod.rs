//! Backend contract and the bundled backends.
//!
//! # Architecture
//!
//! - `LogBackend` trait: the capability set every sink implements
//! - `ConsoleBackend`: colorized lines on stdout/stderr
//! - `MemoryBackend`: keeps rendered lines in memory
//! - `TracingBackend`: forwards records into the `tracing` ecosystem
//!
//! New sinks are added by implementing `LogBackend` and registering an
//! instance with the [`Registry`](crate::Registry); the registry itself never
//! changes.

mod console;
mod memory;
mod tracing_adapter;

use std::fmt::Arguments;

use crate::caller::{CallSite, REGISTRY_RELAY_DEPTH};
use crate::config::LoggerConfig;
use crate::context::LogContext;
use crate::error::LogResult;
use crate::level::Level;

pub use console::{Brush, ConsoleBackend, HostResolver, SharedWriter};
pub use memory::{CapturedLine, MemoryBackend};
pub use tracing_adapter::TracingBackend;

/// One log call as seen by a backend.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    /// Severity of the call
    pub level: Level,
    /// Caller context, `None` behaves like an empty context
    pub ctx: Option<&'a LogContext>,
    /// Message and its arguments, formatted lazily
    pub args: Arguments<'a>,
    /// Call site captured at the log site, if any
    pub call_site: Option<CallSite>,
    /// Frames between the logging code and `LogBackend::log`
    pub relay_depth: usize,
}

impl<'a> Record<'a> {
    /// Record without a captured call site.
    pub fn new(level: Level, ctx: Option<&'a LogContext>, args: Arguments<'a>) -> Self {
        Self {
            level,
            ctx,
            args,
            call_site: None,
            relay_depth: REGISTRY_RELAY_DEPTH,
        }
    }

    /// Attach a call site.
    pub fn with_call_site(mut self, call_site: CallSite) -> Self {
        self.call_site = Some(call_site);
        self
    }

    /// Set the number of frames between the logging code and
    /// [`LogBackend::log`].
    pub fn with_relay_depth(mut self, relay_depth: usize) -> Self {
        self.relay_depth = relay_depth;
        self
    }

    /// Frames to unwind from [`resolve_caller`](crate::caller::resolve_caller)
    /// for a backend configured with `skip`.
    ///
    /// `skip` is expressed for the registry path; records relayed through
    /// fewer frames unwind correspondingly less.
    pub fn caller_skip(&self, skip: usize) -> usize {
        (skip + self.relay_depth).saturating_sub(REGISTRY_RELAY_DEPTH)
    }

    /// The formatted message. Literal text is returned without formatting.
    pub fn message(&self) -> String {
        match self.args.as_str() {
            Some(literal) => literal.to_string(),
            None => self.args.to_string(),
        }
    }

    /// Trace id rendered for display, "" when absent.
    pub fn trace_id(&self) -> String {
        crate::context::trace_id_of(self.ctx)
    }
}

/// Capability set every logger backend implements.
///
/// All methods take `&self`: a backend is shared between the registry and
/// callers and receives concurrent calls, so mutable state lives behind
/// atomics or a lock private to the backend.
///
/// Emission never fails from the caller's point of view. A backend that
/// cannot write drops the line.
pub trait LogBackend: Send + Sync {
    /// (Re)initialize from `config`.
    ///
    /// Fails with [`LogError::InvalidConfig`](crate::LogError::InvalidConfig)
    /// when no config is given.
    fn init(&self, config: Option<&LoggerConfig>) -> LogResult<()>;

    /// Reopen the underlying sink. Sinks without reopenable state succeed.
    fn reopen(&self) -> LogResult<()> {
        Ok(())
    }

    /// Change the threshold. Unrecognized names fall back to info.
    fn set_level(&self, level: &str);

    /// Change the caller frame skip. Ignored unless `skip > 0`.
    fn set_skip(&self, skip: usize);

    /// Emit one record if it passes the backend's threshold.
    fn log(&self, record: &Record<'_>);

    /// Release sink resources. Safe to call repeatedly.
    fn close(&self) {}

    /// Log at fatal level. Does not terminate the process.
    #[inline(never)]
    fn fatal(&self, ctx: Option<&LogContext>, args: Arguments<'_>) {
        self.log(&Record::new(Level::Fatal, ctx, args).with_relay_depth(1));
    }

    /// Log at warn level.
    #[inline(never)]
    fn warn(&self, ctx: Option<&LogContext>, args: Arguments<'_>) {
        self.log(&Record::new(Level::Warn, ctx, args).with_relay_depth(1));
    }

    /// Log at info level.
    #[inline(never)]
    fn info(&self, ctx: Option<&LogContext>, args: Arguments<'_>) {
        self.log(&Record::new(Level::Info, ctx, args).with_relay_depth(1));
    }

    /// Log at debug level.
    #[inline(never)]
    fn debug(&self, ctx: Option<&LogContext>, args: Arguments<'_>) {
        self.log(&Record::new(Level::Debug, ctx, args).with_relay_depth(1));
    }
}
