#![allow(unused)]
//! Receiver integration harness.
//!
//! # What this covers
//!
//! - **Registry to records**: a receiver created by identifier, configured the
//!   way persisted settings configure it, delivers every record in its file.
//! - **Flat files**: one record per non-empty line, level sniffed.
//! - **Mid-stream failures**: a malformed event stops the receiver with the
//!   records before it already delivered.
//! - **Sink back-pressure**: a sink error stops the receiver.
//!
//! # What this does NOT cover
//!
//! - The stdin receiver (see `stdin_harness`)
//!
//! # Running
//!
//! ```sh
//! cargo test --test receiver_harness
//! ```

mod common;
use common::*;

use std::io::Write;

use logrx::{registry, LogLevel, LogRecord, ParseError, Receiver, ReceiverError};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

fn file_with(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write");
    file
}

fn file_receiver(file: &NamedTempFile, format: &str) -> Box<dyn Receiver> {
    let mut receiver = registry::create("file").expect("file receiver is registered");
    receiver
        .set("path", &file.path().display().to_string())
        .expect("path setting");
    receiver.set("format", format).expect("format setting");
    receiver
}

fn drain(receiver: &mut dyn Receiver) -> (Vec<LogRecord>, Result<usize, ReceiverError>) {
    let mut records = Vec::new();
    let result = receiver.receive(&mut |record| {
        records.push(record);
        Ok(())
    });
    (records, result)
}

#[test]
fn log4j_file_delivers_every_event() {
    let file = file_with(XML_LAYOUT_STREAM);
    let mut receiver = file_receiver(&file, "log4j-xml");

    let (records, result) = drain(receiver.as_mut());

    assert_eq!(result.expect("clean end of file"), 2);
    assert_eq!(records[0].message, "invoice 42 issued");
    assert_property!(records[0], "tenant", "acme");
    assert_level!(records[1], LogLevel::Error);
}

#[test]
fn default_logger_applies_to_events_without_logger() {
    let file = file_with(&EventXml::new().message("anonymous").build());
    let mut receiver = file_receiver(&file, "log4j-xml");
    receiver.set("default_logger", "Imported").expect("known setting");

    let (records, result) = drain(receiver.as_mut());

    result.expect("reads");
    assert_eq!(records[0].logger_name, "Imported");
}

#[test]
fn flat_file_yields_one_record_per_line() {
    let file = file_with("10:00:00 INFO booted\n\n10:00:01 WARN disk 91% full\n10:00:02 no level here\n");
    let mut receiver = file_receiver(&file, "flat");

    let (records, result) = drain(receiver.as_mut());

    assert_eq!(result.expect("reads"), 3);
    let levels: Vec<_> = records.iter().map(|r| r.level).collect();
    assert_eq!(levels, [LogLevel::Info, LogLevel::Warn, LogLevel::Info]);
    assert_eq!(records[1].message, "10:00:01 WARN disk 91% full");
    assert_eq!(records[2].logger_name, "FileLogger");
}

#[test]
fn malformed_event_stops_after_delivering_earlier_records() {
    let contents = format!("{SAMPLE_EVENT}\n<log4j:record/>\n{SAMPLE_EVENT}");
    let file = file_with(&contents);
    let mut receiver = file_receiver(&file, "log4j-xml");

    let (records, result) = drain(receiver.as_mut());

    assert_eq!(records.len(), 1);
    assert!(matches!(
        result,
        Err(ReceiverError::Parse(ParseError::UnexpectedElement(_)))
    ));
}

#[test]
fn sink_error_stops_the_receiver() {
    let file = file_with(XML_LAYOUT_STREAM);
    let mut receiver = file_receiver(&file, "log4j-xml");

    let mut seen = 0;
    let result = receiver.receive(&mut |_| {
        seen += 1;
        anyhow::bail!("store is full")
    });

    assert_eq!(seen, 1);
    assert!(matches!(result, Err(ReceiverError::Sink(_))));
}

#[test]
fn invalid_format_setting_is_rejected() {
    let mut receiver = registry::create("file").expect("registered");
    let err = receiver.set("format", "csv").expect_err("unsupported format");
    assert!(err.to_string().contains("csv"));
}
