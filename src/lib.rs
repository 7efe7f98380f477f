//! logrx — log4j XML event parsing and a registry of log receivers.
//!
//! This crate re-exports the two workspace crates so that integration tests
//! and the CLI can import everything from one place.
//!
//! # Architecture
//!
//! ```text
//! Receiver ──► log4j parser ──► LogRecord ──► sink (log store, stdout, ...)
//!    ▲
//! registry (identifier ──► factory)
//! ```
//!
//! The parser and the registry are independent: a caller may parse events it
//! obtained elsewhere, or pick a receiver without ever touching the parser.

pub use logrx_core::{
    config, log4j, normalizer, parse_from_stream, parse_from_string, LogLevel, LogRecord,
    ParseError, THREAD_NOT_AVAILABLE,
};
pub use logrx_receivers::{
    registry, Receiver, ReceiverDescriptor, ReceiverError, ReceiverKind, RecordSink,
};
