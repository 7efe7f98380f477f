//! Core types for logrx-core.
//!
//! This module defines the data structures shared by the parser and the
//! receivers: the normalised [`LogRecord`] and its [`LogLevel`].

use std::collections::HashMap;

use chrono::{DateTime, Local};
use serde::Serialize;

/// Thread name used when an event does not say which thread emitted it.
pub const THREAD_NOT_AVAILABLE: &str = "NA";

/// A normalised log record produced by the parser and handed to a log store.
///
/// A record is always fully populated: fields the source did not provide
/// carry the defaults set by [`LogRecord::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// Dotted name of the emitting component.
    pub logger_name: String,
    pub level: LogLevel,
    /// Emitting thread, [`THREAD_NOT_AVAILABLE`] when unknown.
    pub thread_name: String,
    /// Event time in the local time zone. Defaults to the moment the record
    /// was built.
    pub timestamp: DateTime<Local>,
    /// Message body, possibly empty. Throwable text is appended after a line
    /// break.
    pub message: String,
    /// Throwable text, or the failure description for fallback records.
    pub exception_text: Option<String>,
    pub properties: HashMap<String, String>,
}

impl LogRecord {
    /// A record for `logger_name` with every other field at its default.
    pub fn new(logger_name: impl Into<String>) -> Self {
        Self {
            logger_name: logger_name.into(),
            level: LogLevel::DEFAULT,
            thread_name: THREAD_NOT_AVAILABLE.to_string(),
            timestamp: Local::now(),
            message: String::new(),
            exception_text: None,
            properties: HashMap::new(),
        }
    }
}

/// Log severity level, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Upper-case spellings accepted in the `level` attribute, aliases included.
static LEVEL_SPELLINGS: phf::Map<&'static str, LogLevel> = phf::phf_map! {
    "TRACE" => LogLevel::Trace,
    "ALL" => LogLevel::Trace,
    "FINEST" => LogLevel::Trace,
    "FINER" => LogLevel::Trace,
    "VERBOSE" => LogLevel::Trace,
    "DEBUG" => LogLevel::Debug,
    "FINE" => LogLevel::Debug,
    "INFO" => LogLevel::Info,
    "INFORMATION" => LogLevel::Info,
    "NOTICE" => LogLevel::Info,
    "CONFIG" => LogLevel::Info,
    "WARN" => LogLevel::Warn,
    "WARNING" => LogLevel::Warn,
    "ERROR" => LogLevel::Error,
    "SEVERE" => LogLevel::Error,
    "FATAL" => LogLevel::Fatal,
    "CRITICAL" => LogLevel::Fatal,
    "ALERT" => LogLevel::Fatal,
    "EMERGENCY" => LogLevel::Fatal,
};

impl LogLevel {
    /// Level substituted for missing or unrecognised spellings.
    pub const DEFAULT: LogLevel = LogLevel::Info;

    /// Look up a known spelling, case-insensitively.
    pub fn lookup(spelling: &str) -> Option<LogLevel> {
        LEVEL_SPELLINGS
            .get(spelling.trim().to_ascii_uppercase().as_str())
            .copied()
    }

    /// Map a log4j `level` attribute to a level. Never fails: anything
    /// unrecognised becomes [`LogLevel::DEFAULT`].
    pub fn from_log4j(spelling: &str) -> LogLevel {
        Self::lookup(spelling).unwrap_or_else(|| {
            tracing::trace!(spelling, "unrecognised level, using default");
            LogLevel::DEFAULT
        })
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::DEFAULT
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Fatal => write!(f, "FATAL"),
        }
    }
}
