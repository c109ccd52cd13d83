//! Colorized console backend.
//!
//! Each line looks like:
//!
//! ```text
//! [2026-01-21 14:30:45] [billing] [host-1] [INFO] [t1] [app::run:main.rs:12] charged card
//! ```
//!
//! The level tag and the `[function:file:line] message` body are wrapped in
//! the level's ANSI color. Debug and info go to stdout, warn and fatal to
//! stderr.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::backend::{LogBackend, Record};
use crate::caller::{self, CallSite, DEFAULT_SKIP};
use crate::config::LoggerConfig;
use crate::error::{LogError, LogResult};
use crate::level::Level;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wraps text in one ANSI color and resets afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    code: &'static str,
}

impl Brush {
    /// Brush for an SGR parameter string such as `"1;36"`.
    pub const fn new(code: &'static str) -> Self {
        Self { code }
    }

    /// Color `text`.
    pub fn paint(&self, text: &str) -> String {
        format!("\x1b[{}m{}\x1b[0m", self.code, text)
    }

    /// Brush assigned to a level.
    pub fn for_level(level: Level) -> Brush {
        PALETTE[level as usize]
    }
}

/// Indexed by `Level as usize`; the `None` slot is never painted.
const PALETTE: [Brush; 5] = [
    Brush::new("1;36"), // debug cyan
    Brush::new("1;32"), // info green
    Brush::new("1;33"), // warn yellow
    Brush::new("1;31"), // fatal red
    Brush::new("1;37"), // white
];

/// Cloneable in-memory writer, handy for capturing console output.
#[derive(Debug, Clone, Default)]
pub struct SharedWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl SharedWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    /// Written lines without their terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.lock().len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Write for SharedWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

type Sink = Mutex<Box<dyn Write + Send>>;

/// Resolves the host name recorded in every line.
pub type HostResolver = fn() -> io::Result<String>;

fn system_hostname() -> io::Result<String> {
    let name = nix::unistd::gethostname().map_err(io::Error::from)?;
    Ok(name.to_string_lossy().into_owned())
}

/// Attributes fixed at init time and printed in every line.
#[derive(Debug, Default)]
struct Identity {
    service: String,
    hostname: String,
}

/// Console logger writing colorized lines to stdout and stderr.
pub struct ConsoleBackend {
    level: AtomicU8,
    skip: AtomicUsize,
    color: AtomicBool,
    identity: RwLock<Identity>,
    out: Sink,
    err: Sink,
    host_resolver: HostResolver,
}

impl ConsoleBackend {
    /// Backend writing to the process's stdout and stderr.
    pub fn new() -> Self {
        Self::with_writers(io::stdout(), io::stderr())
    }

    /// Backend writing to the given standard and error streams.
    pub fn with_writers(
        out: impl Write + Send + 'static,
        err: impl Write + Send + 'static,
    ) -> Self {
        Self {
            level: AtomicU8::new(Level::Debug as u8),
            skip: AtomicUsize::new(DEFAULT_SKIP),
            color: AtomicBool::new(true),
            identity: RwLock::new(Identity::default()),
            out: Mutex::new(Box::new(out)),
            err: Mutex::new(Box::new(err)),
            host_resolver: system_hostname,
        }
    }

    /// Enable or disable ANSI colors.
    pub fn with_color(self, color: bool) -> Self {
        self.color.store(color, Ordering::Relaxed);
        self
    }

    /// Replace the host name lookup used by `init`.
    pub fn with_host_resolver(mut self, resolver: HostResolver) -> Self {
        self.host_resolver = resolver;
        self
    }

    /// Current threshold.
    pub fn level(&self) -> Level {
        Level::from(self.level.load(Ordering::Relaxed))
    }

    /// Current caller frame skip.
    pub fn skip(&self) -> usize {
        self.skip.load(Ordering::Relaxed)
    }

    /// Host name cached by the last successful `init`.
    pub fn hostname(&self) -> String {
        self.identity.read().hostname.clone()
    }

    /// Build the full line for `record`, newline included.
    fn render(&self, record: &Record<'_>, site: &CallSite) -> String {
        let color = self.color.load(Ordering::Relaxed);
        let paint = |text: &str| {
            if color {
                Brush::for_level(record.level).paint(text)
            } else {
                text.to_string()
            }
        };

        let body = paint(&format!(
            "[{}:{}:{}] {}",
            site.function,
            site.base_file(),
            site.line,
            record.message()
        ));

        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        let level = paint(record.level.label());
        let trace_id = record.trace_id();
        let identity = self.identity.read();

        format_fields(
            &body,
            &[
                timestamp.as_str(),
                identity.service.as_str(),
                identity.hostname.as_str(),
                level.as_str(),
                trace_id.as_str(),
            ],
        )
    }
}

impl Default for ConsoleBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// `[f1] [f2] ... body\n`
fn format_fields(body: &str, fields: &[&str]) -> String {
    let mut line = String::with_capacity(body.len() + 64);
    for field in fields {
        line.push('[');
        line.push_str(field);
        line.push_str("] ");
    }
    line.push_str(body);
    line.push('\n');
    line
}

impl LogBackend for ConsoleBackend {
    fn init(&self, config: Option<&LoggerConfig>) -> LogResult<()> {
        let config = config.ok_or_else(|| {
            LogError::InvalidConfig("console logger requires a config".to_string())
        })?;

        let hostname = (self.host_resolver)().map_err(LogError::HostResolution)?;

        self.level
            .store(config.effective_level() as u8, Ordering::Relaxed);
        self.set_skip(config.skip);

        let mut identity = self.identity.write();
        identity.service = config.service.clone();
        identity.hostname = hostname;

        Ok(())
    }

    fn set_level(&self, level: &str) {
        self.level
            .store(Level::from_str_lossy(level) as u8, Ordering::Relaxed);
    }

    fn set_skip(&self, skip: usize) {
        if skip > 0 {
            self.skip.store(skip, Ordering::Relaxed);
        }
    }

    #[inline(never)]
    fn log(&self, record: &Record<'_>) {
        if !record.level.passes(self.level()) {
            return;
        }

        // Resolved here so the unwind depth counts from `log`.
        let site = match &record.call_site {
            Some(site) => site.clone(),
            None => caller::resolve_caller(record.caller_skip(self.skip())),
        };
        let line = self.render(record, &site);
        let sink = if record.level.is_error_stream() {
            &self.err
        } else {
            &self.out
        };

        let mut writer = sink.lock();
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    fn close(&self) {
        let _ = self.out.lock().flush();
        let _ = self.err.lock().flush();
    }
}
