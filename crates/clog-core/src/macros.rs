//! Logging macros.
//!
//! The macros capture `module_path!()`, `file!()` and `line!()` at the log
//! site, so attribution does not depend on unwinding.
//!
//! ```
//! use clog_core::{info, warn, LogContext};
//!
//! let ctx = LogContext::with_trace_id("req-7");
//! info!("service started on port {}", 8080);
//! warn!(ctx: &ctx, "slow response: {}ms", 950);
//! ```
//!
//! The `*_to!` forms take an explicit [`Registry`](crate::Registry) as the
//! first argument instead of the global one.

#[doc(hidden)]
#[macro_export]
macro_rules! __clog_log {
    ($registry:expr, $level:expr, $ctx:expr, $($arg:tt)+) => {
        $registry.log(
            &$crate::Record::new($level, $ctx, format_args!($($arg)+))
                .with_call_site($crate::CallSite::new(module_path!(), file!(), line!())),
        )
    };
}

/// Log at debug level on the global registry.
#[macro_export]
macro_rules! debug {
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__clog_log!($crate::global(), $crate::Level::Debug, Some($ctx), $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__clog_log!($crate::global(), $crate::Level::Debug, None, $($arg)+)
    };
}

/// Log at info level on the global registry.
#[macro_export]
macro_rules! info {
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__clog_log!($crate::global(), $crate::Level::Info, Some($ctx), $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__clog_log!($crate::global(), $crate::Level::Info, None, $($arg)+)
    };
}

/// Log at warn level on the global registry.
#[macro_export]
macro_rules! warn {
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__clog_log!($crate::global(), $crate::Level::Warn, Some($ctx), $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__clog_log!($crate::global(), $crate::Level::Warn, None, $($arg)+)
    };
}

/// Log at fatal level on the global registry. Does not terminate.
#[macro_export]
macro_rules! fatal {
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__clog_log!($crate::global(), $crate::Level::Fatal, Some($ctx), $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__clog_log!($crate::global(), $crate::Level::Fatal, None, $($arg)+)
    };
}

/// Log at debug level on the given registry.
#[macro_export]
macro_rules! debug_to {
    ($registry:expr, ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__clog_log!($registry, $crate::Level::Debug, Some($ctx), $($arg)+)
    };
    ($registry:expr, $($arg:tt)+) => {
        $crate::__clog_log!($registry, $crate::Level::Debug, None, $($arg)+)
    };
}

/// Log at info level on the given registry.
#[macro_export]
macro_rules! info_to {
    ($registry:expr, ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__clog_log!($registry, $crate::Level::Info, Some($ctx), $($arg)+)
    };
    ($registry:expr, $($arg:tt)+) => {
        $crate::__clog_log!($registry, $crate::Level::Info, None, $($arg)+)
    };
}

/// Log at warn level on the given registry.
#[macro_export]
macro_rules! warn_to {
    ($registry:expr, ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__clog_log!($registry, $crate::Level::Warn, Some($ctx), $($arg)+)
    };
    ($registry:expr, $($arg:tt)+) => {
        $crate::__clog_log!($registry, $crate::Level::Warn, None, $($arg)+)
    };
}

/// Log at fatal level on the given registry. Does not terminate.
#[macro_export]
macro_rules! fatal_to {
    ($registry:expr, ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__clog_log!($registry, $crate::Level::Fatal, Some($ctx), $($arg)+)
    };
    ($registry:expr, $($arg:tt)+) => {
        $crate::__clog_log!($registry, $crate::Level::Fatal, None, $($arg)+)
    };
}
