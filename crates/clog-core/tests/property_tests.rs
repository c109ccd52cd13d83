//! Property-based tests for level handling
//!
//! Uses proptest to verify threshold filtering and level parsing hold for
//! every input.

use std::sync::Arc;

use clog_core::{Level, LoggerConfig, MemoryBackend, Registry};
use proptest::prelude::*;

// ============================================================================
// Strategy Generators
// ============================================================================

/// Any emittable level (None is a threshold, never a call level)
fn call_level_strategy() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Debug),
        Just(Level::Info),
        Just(Level::Warn),
        Just(Level::Fatal),
    ]
}

/// Any threshold, including None
fn threshold_strategy() -> impl Strategy<Value = Level> {
    (0u8..5).prop_map(Level::from)
}

/// Recognized names in random letter case
fn mixed_case_name_strategy() -> impl Strategy<Value = (Level, String)> {
    (threshold_strategy(), prop::collection::vec(any::<bool>(), 5)).prop_map(|(level, upper)| {
        let name: String = level
            .name()
            .chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect();
        (level, name)
    })
}

fn emit(registry: &Registry, level: Level) {
    match level {
        Level::Debug => registry.debug(None, format_args!("m")),
        Level::Info => registry.info(None, format_args!("m")),
        Level::Warn => registry.warn(None, format_args!("m")),
        Level::Fatal => registry.fatal(None, format_args!("m")),
        Level::None => {}
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// A call is written exactly when its level reaches the threshold
    #[test]
    fn threshold_filtering(call in call_level_strategy(), threshold in threshold_strategy()) {
        let registry = Registry::new();
        let memory = Arc::new(MemoryBackend::new());
        registry.register_logger("mem", memory.clone()).unwrap();
        registry
            .init_logger("mem", Some(&LoggerConfig::new(threshold.name())))
            .unwrap();

        emit(&registry, call);

        let expected = if threshold != Level::None && call >= threshold { 1 } else { 0 };
        prop_assert_eq!(memory.len(), expected);
    }

    /// Lossy parsing never fails and unknown names mean info
    #[test]
    fn lossy_parse_is_total(name in ".{0,24}") {
        let expected = match name.to_lowercase().as_str() {
            "debug" => Level::Debug,
            "warn" => Level::Warn,
            "fatal" => Level::Fatal,
            "none" => Level::None,
            _ => Level::Info,
        };
        prop_assert_eq!(Level::from_str_lossy(&name), expected);
    }

    /// Letter case never changes the parsed level
    #[test]
    fn lossy_parse_ignores_case((level, name) in mixed_case_name_strategy()) {
        prop_assert_eq!(Level::from_str_lossy(&name), level);
    }
}
