//! Process-wide registry tests
//!
//! Kept to a single test: the global registry is shared by every test in
//! this binary and the steps below depend on each other.

use std::sync::Arc;

use clog_core::{LogContext, LoggerConfig, MemoryBackend, CONSOLE, SOURCE_AUTO};

#[test]
fn test_global_registry_lifecycle() {
    // Auto-injected console logger exists before any setup
    let console = clog_core::global().entry_state(CONSOLE).unwrap();
    assert!(console.initialized);
    assert!(console.enabled);
    assert_eq!(console.source, SOURCE_AUTO);

    clog_core::info!("logged by the auto console logger");

    // Configuring a real logger silences the auto one
    let memory = Arc::new(MemoryBackend::new());
    clog_core::register_logger("memory", memory.clone()).unwrap();
    clog_core::init_logger(
        "memory",
        Some(&LoggerConfig::new("info").with_service("global-test")),
    )
    .unwrap();
    assert!(!clog_core::global().entry_state(CONSOLE).unwrap().enabled);

    let ctx = LogContext::with_trace_id("g-1");
    clog_core::debug!("below threshold");
    clog_core::info!(ctx: &ctx, "answer={}", 42);
    clog_core::warn!("careful");
    clog_core::fatal!(ctx: &ctx, "not fatal to the process");

    assert_eq!(
        memory.lines(),
        vec![
            "[INFO] [global-test] [g-1] answer=42".to_string(),
            "[WARN] [global-test] [] careful".to_string(),
            "[FATAL] [global-test] [g-1] not fatal to the process".to_string(),
        ]
    );

    clog_core::set_level("memory", "fatal").unwrap();
    clog_core::warn!("dropped");
    assert_eq!(memory.len(), 3);

    assert_eq!(clog_core::reopen().to_string(), "");

    clog_core::shutdown();
    assert!(memory.is_closed());
    assert!(clog_core::get_logger("memory").is_err());
}
