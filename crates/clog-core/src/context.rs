//! Per-call context carrying the trace identifier.

use std::fmt;

/// Trace identifier threaded through a call for log correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TraceId {
    /// Numeric id
    Int(i64),
    /// Textual id
    Str(String),
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceId::Int(v) => write!(f, "{}", v),
            TraceId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TraceId {
    fn from(v: i64) -> Self {
        TraceId::Int(v)
    }
}

impl From<i32> for TraceId {
    fn from(v: i32) -> Self {
        TraceId::Int(v.into())
    }
}

impl From<&str> for TraceId {
    fn from(s: &str) -> Self {
        TraceId::Str(s.to_string())
    }
}

impl From<String> for TraceId {
    fn from(s: String) -> Self {
        TraceId::Str(s)
    }
}

/// Opaque call context handed to every log verb.
///
/// The only datum backends read from it is the trace id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogContext {
    trace_id: Option<TraceId>,
}

impl LogContext {
    /// Context without a trace id.
    pub fn background() -> Self {
        Self::default()
    }

    /// Context carrying `trace_id`.
    pub fn with_trace_id(trace_id: impl Into<TraceId>) -> Self {
        Self {
            trace_id: Some(trace_id.into()),
        }
    }

    /// The trace id, if any.
    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    /// Trace id rendered for a log line; empty when absent.
    pub fn trace_id_display(&self) -> String {
        self.trace_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

/// Render the trace id of an optional context; `None` yields "".
pub fn trace_id_of(ctx: Option<&LogContext>) -> String {
    ctx.map(LogContext::trace_id_display).unwrap_or_default()
}
