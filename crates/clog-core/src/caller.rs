//! Log-site attribution.
//!
//! The logging macros capture the call site at compile time. Calls that
//! bypass the macros are attributed by capturing a backtrace and unwinding
//! a configured number of frames. That path is best-effort: missing debug
//! info or inlining yields `"???"` placeholders instead of an error.

use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::path::Path;

/// Placeholder for anything that could not be resolved.
pub const UNKNOWN: &str = "???";

/// Frames unwound by default, counted from [`resolve_caller`] itself.
///
/// Matches a call that goes `caller -> Registry verb -> dispatch ->
/// LogBackend::log -> resolve_caller`.
pub const DEFAULT_SKIP: usize = 4;

/// Frames a registry verb adds above `LogBackend::log` (verb, dispatch).
///
/// Backend verbs called directly add one frame, so they unwind one less.
pub const REGISTRY_RELAY_DEPTH: usize = 2;

/// Where a log call came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Function or module path of the caller
    pub function: Cow<'static, str>,
    /// Source file as recorded by the compiler or backtrace
    pub file: Cow<'static, str>,
    /// Line number, 0 when unknown
    pub line: u32,
}

impl CallSite {
    /// Call site captured by a macro expansion.
    pub const fn new(function: &'static str, file: &'static str, line: u32) -> Self {
        Self {
            function: Cow::Borrowed(function),
            file: Cow::Borrowed(file),
            line,
        }
    }

    /// Placeholder call site.
    pub const fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN, 0)
    }

    /// File name without its directories.
    pub fn base_file(&self) -> &str {
        Path::new(self.file.as_ref())
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or(self.file.as_ref())
    }
}

/// One parsed backtrace frame.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    function: String,
    file: Option<String>,
    line: u32,
}

/// Resolve the caller `skip` frames above this function.
///
/// Frame 0 is `resolve_caller` itself. Frames belonging to the backtrace
/// machinery are dropped before counting.
#[inline(never)]
pub fn resolve_caller(skip: usize) -> CallSite {
    let trace = Backtrace::force_capture().to_string();
    let frames = parse_backtrace(&trace);

    let start = frames
        .iter()
        .position(|f| f.function.contains("resolve_caller"))
        .unwrap_or(0);

    match start.checked_add(skip).and_then(|i| frames.get(i)) {
        Some(frame) => CallSite {
            function: Cow::Owned(frame.function.clone()),
            file: frame
                .file
                .clone()
                .map(Cow::Owned)
                .unwrap_or(Cow::Borrowed(UNKNOWN)),
            line: frame.line,
        },
        None => CallSite::unknown(),
    }
}

/// Parse the `Display` rendering of a std backtrace.
///
/// ```text
///    3: my_app::handler
///              at ./src/handler.rs:42:9
/// ```
fn parse_backtrace(text: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();

        if let Some(location) = trimmed.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                if frame.file.is_none() {
                    let (file, line) = split_location(location);
                    frame.file = Some(file);
                    frame.line = line;
                }
            }
            continue;
        }

        if let Some((index, function)) = trimmed.split_once(": ") {
            if !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()) {
                frames.push(Frame {
                    function: strip_hash(function.trim()).to_string(),
                    file: None,
                    line: 0,
                });
            }
        }
    }

    frames
}

/// Split `path:line:col` into path and line.
fn split_location(location: &str) -> (String, u32) {
    let mut parts = location.rsplitn(3, ':');
    let col = parts.next();
    let line = parts.next();
    let path = parts.next();

    match (path, line, col) {
        (Some(path), Some(line), Some(_)) => (path.to_string(), line.parse().unwrap_or(0)),
        _ => (location.to_string(), 0),
    }
}

/// Drop the `::h0123456789abcdef` disambiguator some renderings keep.
fn strip_hash(function: &str) -> &str {
    match function.rsplit_once("::h") {
        Some((head, hash)) if hash.len() == 16 && hash.chars().all(|c| c.is_ascii_hexdigit()) => {
            head
        }
        _ => function,
    }
}
