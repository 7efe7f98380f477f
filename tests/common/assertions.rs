//! Domain-specific assertion helpers for logrx harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* record invariant was violated.

use logrx::LogRecord;

/// Assert that a `LogRecord` has a property with an expected value.
///
/// ```rust
/// assert_property!(record, "host", "srv1");
/// ```
#[macro_export]
macro_rules! assert_property {
    ($record:expr, $key:expr, $value:expr) => {{
        let record: &logrx::LogRecord = &$record;
        let key: &str = $key;
        let expected: &str = $value;
        match record.properties.get(key) {
            Some(actual) if actual == expected => {}
            Some(actual) => panic!(
                "assert_property! failed:\n  record.properties[{:?}]\n  expected: {:?}\n  actual:   {:?}",
                key, expected, actual
            ),
            None => panic!(
                "assert_property! failed: property {:?} not found.\n  Available: {:?}",
                key,
                record.properties.keys().collect::<Vec<_>>()
            ),
        }
    }};
}

/// Assert that a `LogRecord` has a specific level.
#[macro_export]
macro_rules! assert_level {
    ($record:expr, $level:expr) => {{
        let record: &logrx::LogRecord = &$record;
        let expected: logrx::LogLevel = $level;
        if record.level != expected {
            panic!(
                "assert_level! failed:\n  expected: {:?}\n  actual:   {:?}\n  message: {:?}",
                expected, record.level, record.message
            );
        }
    }};
}

/// Assert that `record` is the fallback produced for `input`: raw text kept as
/// the message, caller's default logger, thread `NA`, `Info` level, and a
/// failure description as exception text.
pub fn assert_fallback(record: &LogRecord, input: &str, default_logger: &str) {
    pretty_assertions::assert_eq!(record.message, input, "fallback must keep the raw input");
    pretty_assertions::assert_eq!(record.logger_name, default_logger);
    pretty_assertions::assert_eq!(record.thread_name, logrx::THREAD_NOT_AVAILABLE);
    pretty_assertions::assert_eq!(record.level, logrx::LogLevel::Info);
    assert!(
        record.exception_text.is_some(),
        "fallback record must describe the failure: {input:?}"
    );
    assert!(record.properties.is_empty());
}
