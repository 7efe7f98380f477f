//! Normalizer — turns one plain text line into a [`LogRecord`].
//!
//! Used for flat files that hold no markup. The whole line becomes the
//! message; the level is sniffed from the first upper-case token that names
//! one (`ERROR`, `WARN`, `FATAL`, ...).

use crate::types::{LogLevel, LogRecord};

/// Build a record for `line`, attributed to `logger`.
pub fn normalize_line(line: &str, logger: &str) -> LogRecord {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut record = LogRecord::new(logger);
    if let Some(level) = sniff_level(line) {
        record.level = level;
    }
    record.message = line.to_string();
    record
}

fn sniff_level(line: &str) -> Option<LogLevel> {
    line.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|token| token.len() >= 3 && token.bytes().all(|b| b.is_ascii_uppercase()))
        .find_map(LogLevel::lookup)
}
