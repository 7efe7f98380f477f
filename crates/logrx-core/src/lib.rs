//! logrx-core — shared types, the log4j event parser and configuration.
//!
//! # Architecture
//!
//! ```text
//! raw event (stream or string) ──► log4j parser ──► LogRecord ──► log store
//! plain text line ──────────────► normalizer ────┘
//! ```
//!
//! Everything here is synchronous. Receivers (see `logrx-receivers`) drive
//! the parser from their own blocking loops.

pub mod config;
pub mod log4j;
pub mod normalizer;
pub mod types;

pub use log4j::{parse_from_stream, parse_from_string, ParseError};
pub use types::{LogLevel, LogRecord, THREAD_NOT_AVAILABLE};
