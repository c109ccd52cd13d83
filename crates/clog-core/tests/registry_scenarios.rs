//! Registry scenario tests
//!
//! End-to-end checks of registration, initialization, auto-logger silencing
//! and fan-out, using captured console streams instead of the real stdout.

use std::io;
use std::sync::Arc;

use clog_core::{
    ConsoleBackend, LogBackend, LogContext, LogError, LogResult, LoggerConfig, LoggingConfig,
    MemoryBackend, Record, Registry, SharedWriter, CONSOLE, SOURCE_AUTO,
};

// ============================================================================
// Test Utilities
// ============================================================================

fn test_host() -> io::Result<String> {
    Ok("test-host".to_string())
}

/// Console backend writing into two capture buffers.
fn captured_console() -> (Arc<ConsoleBackend>, SharedWriter, SharedWriter) {
    let out = SharedWriter::new();
    let err = SharedWriter::new();
    let backend = ConsoleBackend::with_writers(out.clone(), err.clone())
        .with_host_resolver(test_host);
    (Arc::new(backend), out, err)
}

/// Backend whose reopen always fails.
struct BrokenSink;

impl LogBackend for BrokenSink {
    fn init(&self, _config: Option<&LoggerConfig>) -> LogResult<()> {
        Ok(())
    }

    fn reopen(&self) -> LogResult<()> {
        Err(LogError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "read-only filesystem",
        )))
    }

    fn set_level(&self, _level: &str) {}

    fn set_skip(&self, _skip: usize) {}

    fn log(&self, _record: &Record<'_>) {}
}

// ============================================================================
// Console Scenarios
// ============================================================================

#[test]
fn test_console_debug_line() {
    let registry = Registry::new();
    let (console, out, err) = captured_console();
    registry.register_logger(CONSOLE, console).unwrap();
    registry
        .init_logger(
            CONSOLE,
            Some(&LoggerConfig::new("debug").with_service("svc1")),
        )
        .unwrap();

    let ctx = LogContext::with_trace_id("t1");
    registry.debug(Some(&ctx), format_args!("x={}", 5));

    let content = out.contents();
    assert_eq!(out.lines().len(), 1);
    assert!(content.ends_with('\n'));
    for needle in ["svc1", "t1", "DEBUG", "x=5"] {
        assert!(content.contains(needle), "missing {} in {}", needle, content);
    }
    assert!(err.is_empty());
}

#[test]
fn test_console_warn_threshold() {
    let registry = Registry::new();
    let (console, out, err) = captured_console();
    registry.register_logger(CONSOLE, console).unwrap();
    registry
        .init_logger(CONSOLE, Some(&LoggerConfig::new("warn")))
        .unwrap();

    let ctx = LogContext::background();
    registry.info(Some(&ctx), format_args!("hidden"));
    assert!(out.is_empty());
    assert!(err.is_empty());

    registry.warn(Some(&ctx), format_args!("shown"));
    assert!(out.is_empty());
    assert_eq!(err.lines().len(), 1);
    assert!(err.contents().contains("shown"));
}

#[test]
fn test_fatal_does_not_terminate() {
    let registry = Registry::new();
    let (console, _, err) = captured_console();
    registry.register_logger(CONSOLE, console).unwrap();
    registry
        .init_logger(CONSOLE, Some(&LoggerConfig::new("fatal")))
        .unwrap();

    registry.fatal(None, format_args!("disk full"));
    registry.fatal(None, format_args!("still running"));

    assert_eq!(err.lines().len(), 2);
}

// ============================================================================
// Caller Attribution
// ============================================================================

#[inline(never)]
fn log_via_registry(registry: &Registry) {
    registry.info(None, format_args!("via registry"));
}

#[inline(never)]
fn log_via_backend(backend: &dyn LogBackend) {
    backend.info(None, format_args!("via backend"));
}

/// Registry with an initialized captured console logger.
fn registry_with_console() -> (Registry, SharedWriter) {
    let registry = Registry::new();
    let (console, out, _err) = captured_console();
    registry.register_logger(CONSOLE, console).unwrap();
    registry
        .init_logger(CONSOLE, Some(&LoggerConfig::new("debug")))
        .unwrap();
    (registry, out)
}

#[test]
fn test_registry_verb_attributed_to_calling_function() {
    let (registry, out) = registry_with_console();

    log_via_registry(&registry);

    let content = out.contents();
    assert!(
        content.contains("[registry_scenarios::log_via_registry:registry_scenarios.rs:"),
        "unexpected call site in {}",
        content
    );
}

#[test]
fn test_backend_verb_attributed_to_calling_function() {
    let (registry, out) = registry_with_console();
    let backend = registry.get_logger(CONSOLE).unwrap();

    log_via_backend(backend.as_ref());

    let content = out.contents();
    assert!(
        content.contains("[registry_scenarios::log_via_backend:registry_scenarios.rs:"),
        "unexpected call site in {}",
        content
    );
}

// ============================================================================
// Registry Lifecycle
// ============================================================================

#[test]
fn test_auto_logger_silenced_by_real_logger() {
    let (auto, auto_out, _) = captured_console();
    let registry = Registry::with_auto_logger(CONSOLE, auto);

    let state = registry.entry_state(CONSOLE).unwrap();
    assert!(state.enabled && state.initialized);
    assert_eq!(state.source, SOURCE_AUTO);

    registry.info(None, format_args!("zero config works"));
    assert_eq!(auto_out.lines().len(), 1);

    let real = Arc::new(MemoryBackend::new());
    registry.register_logger("real", real.clone()).unwrap();
    registry
        .init_logger("real", Some(&LoggerConfig::new("info")))
        .unwrap();

    assert!(!registry.entry_state(CONSOLE).unwrap().enabled);
    assert!(registry.entry_state("real").unwrap().enabled);

    registry.info(None, format_args!("after setup"));
    assert_eq!(auto_out.lines().len(), 1);
    assert_eq!(real.len(), 1);
}

#[test]
fn test_silenced_auto_logger_can_be_reenabled() {
    let (auto, auto_out, _) = captured_console();
    let registry = Registry::with_auto_logger(CONSOLE, auto);
    registry
        .register_logger("real", Arc::new(MemoryBackend::new()))
        .unwrap();
    registry
        .init_logger("real", Some(&LoggerConfig::new("info")))
        .unwrap();

    registry.enable_logger(CONSOLE, true).unwrap();
    registry.info(None, format_args!("back"));
    assert_eq!(auto_out.lines().len(), 1);
}

#[test]
fn test_enable_without_init_is_noop() {
    let registry = Registry::new();
    let memory = Arc::new(MemoryBackend::new());
    registry.register_logger("mem", memory.clone()).unwrap();

    registry.enable_logger("mem", true).unwrap();
    registry.info(None, format_args!("nobody listens"));

    assert!(!registry.entry_state("mem").unwrap().enabled);
    assert!(memory.is_empty());
}

#[test]
fn test_unregister_then_register_starts_fresh() {
    let registry = Registry::new();
    let first = Arc::new(MemoryBackend::new());
    registry.register_logger("mem", first.clone()).unwrap();
    registry
        .init_logger("mem", Some(&LoggerConfig::new("debug")))
        .unwrap();

    registry.unregister_logger("mem").unwrap();
    assert!(first.is_closed());

    let second = Arc::new(MemoryBackend::new());
    registry.register_logger("mem", second.clone()).unwrap();
    let state = registry.entry_state("mem").unwrap();
    assert!(!state.enabled);
    assert!(!state.initialized);

    registry.info(None, format_args!("unheard"));
    assert!(second.is_empty());
}

#[test]
fn test_duplicate_name_rejected() {
    let registry = Registry::new();
    let original = Arc::new(MemoryBackend::new());
    registry.register_logger("mem", original.clone()).unwrap();

    let result = registry.register_logger("mem", Arc::new(MemoryBackend::new()));
    assert!(matches!(result, Err(LogError::DuplicateName(_))));

    let fetched = registry.get_logger("mem").unwrap();
    fetched.init(Some(&LoggerConfig::new("debug"))).unwrap();
    fetched.info(None, format_args!("via lookup"));
    assert_eq!(original.len(), 1);
}

#[test]
fn test_fan_out_reaches_every_enabled_backend() {
    let registry = Registry::new();
    let quiet = Arc::new(MemoryBackend::new());
    let chatty = Arc::new(MemoryBackend::new());
    let disabled = Arc::new(MemoryBackend::new());

    registry.register_logger("quiet", quiet.clone()).unwrap();
    registry.register_logger("chatty", chatty.clone()).unwrap();
    registry.register_logger("disabled", disabled.clone()).unwrap();

    let config = LoggingConfig::from_json_str(
        r#"{ "loggers": {
            "quiet": { "level": "warn" },
            "chatty": { "level": "debug" },
            "disabled": { "level": "debug" }
        } }"#,
    )
    .unwrap();
    registry.apply_config(&config).unwrap();
    registry.enable_logger("disabled", false).unwrap();

    registry.debug(None, format_args!("d"));
    registry.info(None, format_args!("i"));
    registry.warn(None, format_args!("w"));

    assert_eq!(quiet.len(), 1);
    assert_eq!(chatty.len(), 3);
    assert!(disabled.is_empty());
}

// ============================================================================
// Reopen
// ============================================================================

#[test]
fn test_reopen_all_success_is_empty_message() {
    let registry = Registry::with_auto_logger(CONSOLE, captured_console().0);
    let report = registry.reopen();
    assert_eq!(report.to_string(), "");
    assert!(report.is_success());
}

#[test]
fn test_reopen_collects_failures_without_stopping() {
    let registry = Registry::new();
    let memory = Arc::new(MemoryBackend::new());
    registry.register_logger("broken-a", Arc::new(BrokenSink)).unwrap();
    registry.register_logger("broken-b", Arc::new(BrokenSink)).unwrap();
    registry.register_logger("mem", memory).unwrap();
    registry.register_logger("idle", Arc::new(BrokenSink)).unwrap();

    let config = LoggerConfig::default();
    registry.init_logger("broken-a", Some(&config)).unwrap();
    registry.init_logger("broken-b", Some(&config)).unwrap();
    registry.init_logger("mem", Some(&config)).unwrap();

    let report = registry.reopen();
    assert!(!report.is_success());
    assert_eq!(report.failures().len(), 2);

    let text = report.to_string();
    assert!(text.contains("logger: broken-a reopen failed"));
    assert!(text.contains("logger: broken-b reopen failed"));
    assert!(text.contains("read-only filesystem"));
    assert!(!text.contains("idle"));
    assert!(report.into_result().is_err());
}
