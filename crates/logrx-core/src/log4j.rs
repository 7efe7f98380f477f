//! log4j XML event parser.
//!
//! Turns one `<log4j:event>` element into a [`LogRecord`]. Two entry points
//! share the same core:
//!
//! - [`parse_from_stream`] reads exactly one event from an open reader and
//!   propagates every failure, so a connection-level caller can tell a broken
//!   stream from a bad record.
//! - [`parse_from_string`] is best-effort and never fails: malformed input
//!   becomes a fallback record carrying the raw text.
//!
//! ```text
//! <log4j:event logger="App.Worker" timestamp="1184286222308" level="ERROR" thread="1">
//!   <log4j:message>Boom</log4j:message>
//!   <log4j:throwable>java.lang.IllegalStateException ...</log4j:throwable>
//!   <log4j:locationInfo class="App.Worker" method="run" file="Worker.java" line="42"/>
//!   <log4j:properties>
//!     <log4j:data name="host" value="srv1"/>
//!   </log4j:properties>
//! </log4j:event>
//! ```

use std::collections::HashMap;
use std::io::BufRead;
use std::sync::Arc;

use chrono::{DateTime, Local};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::types::{LogLevel, LogRecord};

/// Namespace URI of the log4j event vocabulary.
pub const LOG4J_NAMESPACE: &str = "http://jakarta.apache.org/log4j/";

/// Prefix bound to [`LOG4J_NAMESPACE`] without an explicit declaration.
pub const LOG4J_PREFIX: &str = "log4j";

/// Why an event could not be read.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The underlying reader failed, usually a dropped connection.
    #[error("stream read failed: {0}")]
    Io(#[source] Arc<std::io::Error>),

    #[error("malformed event markup: {0}")]
    Xml(#[source] quick_xml::Error),

    #[error("expected a log4j event element, found <{0}>")]
    UnexpectedElement(String),

    #[error("<{element}> is not in the log4j namespace (bound to {namespace:?})")]
    ForeignNamespace {
        element: String,
        namespace: Option<String>,
    },

    /// Character data other than whitespace precedes the event element.
    #[error("text found before the event element")]
    TextBeforeEvent,

    /// The stream ended cleanly before any element started.
    #[error("stream ended before an event started")]
    EndOfStream,

    /// The stream ended between the event's start and end tags.
    #[error("stream ended inside an event")]
    Truncated,
}

impl ParseError {
    /// `true` when the reader itself failed rather than the markup.
    pub fn is_stream_failure(&self) -> bool {
        matches!(self, ParseError::Io(_))
    }
}

impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(io) => ParseError::Io(io),
            other => ParseError::Xml(other),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for ParseError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        ParseError::Xml(err.into())
    }
}

/// Read exactly one event from `stream`.
///
/// Declarations, comments and whitespace before the first element are
/// skipped; any other text there is an error. On success the reader is left
/// just past the event's closing tag, so calling this again yields the next
/// event. The stream is never closed here. `default_logger` names the record
/// when the event has no `logger` attribute.
///
/// # Errors
///
/// Returns [`ParseError::EndOfStream`] when the stream holds no further
/// element, [`ParseError::TextBeforeEvent`] when non-blank text precedes it,
/// [`ParseError::Io`] when the reader fails, and the remaining variants for
/// markup that is not a log4j event.
pub fn parse_from_stream<R>(stream: &mut R, default_logger: &str) -> Result<LogRecord, ParseError>
where
    R: BufRead + ?Sized,
{
    let mut reader = Reader::from_reader(stream);
    let mut buf = Vec::new();

    let (root, has_content) = loop {
        let stray_text = match reader.read_event_into(&mut buf)? {
            Event::Start(e) => break (e.into_owned(), true),
            Event::Empty(e) => break (e.into_owned(), false),
            Event::Eof => return Err(ParseError::EndOfStream),
            Event::Text(t) => !is_blank(&t),
            Event::CData(_) => true,
            _ => false,
        };
        buf.clear();
        if stray_text {
            return Err(ParseError::TextBeforeEvent);
        }
    };

    check_event_element(&root)?;

    let mut event = EventBuilder::new(default_logger);
    event.read_attributes(&root)?;
    if has_content {
        event.read_children(&mut reader)?;
    }
    Ok(event.finish())
}

/// Parse a complete event held in memory. Never fails.
///
/// Malformed input yields [`fallback_record`] so nothing the producer sent
/// is lost.
pub fn parse_from_string(text: &str, default_logger: &str) -> LogRecord {
    match parse_from_stream(&mut text.as_bytes(), default_logger) {
        Ok(record) => record,
        Err(err) => {
            tracing::debug!(error = %err, "malformed log4j event, keeping raw text");
            fallback_record(text, default_logger, &err)
        }
    }
}

/// The record substituted for input that is not a readable event: the raw
/// text as message, `Info` level, current time, and the failure as
/// exception text.
pub fn fallback_record(text: &str, default_logger: &str, err: &ParseError) -> LogRecord {
    let mut record = LogRecord::new(default_logger);
    record.message = text.to_string();
    record.exception_text = Some(format!("failed to parse log4j event: {err}"));
    record
}

// ---------------------------------------------------------------------------
// Root element
// ---------------------------------------------------------------------------

fn check_event_element(root: &BytesStart<'_>) -> Result<(), ParseError> {
    let name = root.name();
    if name.local_name().as_ref() != b"event" {
        return Err(ParseError::UnexpectedElement(lossy(name.as_ref())));
    }

    let prefix = name.prefix().map(|p| lossy(p.as_ref()));
    let namespace = resolve_namespace(root, prefix.as_deref())?;
    if namespace.as_deref() != Some(LOG4J_NAMESPACE) {
        return Err(ParseError::ForeignNamespace {
            element: lossy(name.as_ref()),
            namespace,
        });
    }
    Ok(())
}

/// Namespace bound to `prefix` on the event element. Declarations on the
/// element win; otherwise `log4j:` and the default namespace both resolve to
/// [`LOG4J_NAMESPACE`] and any other prefix is unbound.
fn resolve_namespace(
    element: &BytesStart<'_>,
    prefix: Option<&str>,
) -> Result<Option<String>, ParseError> {
    let declaration = match prefix {
        Some(p) => format!("xmlns:{p}"),
        None => "xmlns".to_string(),
    };
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == declaration.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }

    Ok(match prefix {
        None | Some(LOG4J_PREFIX) => Some(LOG4J_NAMESPACE.to_string()),
        Some(_) => None,
    })
}

// ---------------------------------------------------------------------------
// Event body
// ---------------------------------------------------------------------------

/// Child elements of an event the parser knows about.
enum Child {
    Message,
    Throwable,
    LocationInfo,
    Properties,
    Unknown,
}

impl Child {
    fn from_local_name(name: &[u8]) -> Child {
        match name {
            b"message" => Child::Message,
            b"throwable" => Child::Throwable,
            b"locationInfo" => Child::LocationInfo,
            b"properties" => Child::Properties,
            _ => Child::Unknown,
        }
    }
}

struct EventBuilder {
    record: LogRecord,
    throwable: Option<String>,
}

impl EventBuilder {
    fn new(default_logger: &str) -> Self {
        Self {
            record: LogRecord::new(default_logger),
            throwable: None,
        }
    }

    fn read_attributes(&mut self, root: &BytesStart<'_>) -> Result<(), ParseError> {
        for attr in root.attributes() {
            let attr = attr?;
            let value = attr.unescape_value()?;
            // log4j attributes are unprefixed; `x:level` belongs to another vocabulary.
            match attr.key.as_ref() {
                b"logger" => self.record.logger_name = value.into_owned(),
                b"level" => self.record.level = LogLevel::from_log4j(&value),
                b"thread" => self.record.thread_name = value.into_owned(),
                b"timestamp" => match parse_timestamp(&value) {
                    Some(ts) => self.record.timestamp = ts,
                    None => tracing::trace!(timestamp = %value, "unparseable timestamp, keeping now"),
                },
                _ => {}
            }
        }
        Ok(())
    }

    /// Walk the event's children up to its end tag.
    fn read_children<R: BufRead>(&mut self, reader: &mut Reader<R>) -> Result<(), ParseError> {
        let mut buf = Vec::new();
        loop {
            let next = match reader.read_event_into(&mut buf)? {
                Event::Start(e) => Some((Child::from_local_name(e.local_name().as_ref()), true)),
                Event::Empty(e) => Some((Child::from_local_name(e.local_name().as_ref()), false)),
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(ParseError::Truncated),
                _ => None,
            };
            buf.clear();
            let Some((child, has_content)) = next else {
                continue;
            };

            match child {
                Child::Message => self.record.message = read_text(reader, has_content)?,
                Child::Throwable => self.throwable = Some(read_text(reader, has_content)?),
                Child::Properties if has_content => {
                    read_properties(reader, &mut self.record.properties)?
                }
                Child::Properties => {}
                Child::LocationInfo | Child::Unknown if has_content => skip_element(reader)?,
                Child::LocationInfo | Child::Unknown => {}
            }
        }
    }

    fn finish(mut self) -> LogRecord {
        if let Some(throwable) = self.throwable {
            self.record.message.push('\n');
            self.record.message.push_str(&throwable);
            self.record.exception_text = Some(throwable);
        }
        self.record
    }
}

/// Milliseconds since the Unix epoch, shown in local time.
fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    let millis = value.trim().parse::<i64>().ok()?;
    DateTime::from_timestamp_millis(millis).map(|utc| utc.with_timezone(&Local))
}

/// Text of the element just opened, nested descendants included, consumed up
/// to and including its end tag.
fn read_text<R: BufRead>(reader: &mut Reader<R>, has_content: bool) -> Result<String, ParseError> {
    let mut text = String::new();
    if !has_content {
        return Ok(text);
    }

    let mut buf = Vec::new();
    let mut depth = 0usize;
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => return Ok(text),
            Event::End(_) => depth -= 1,
            Event::Eof => return Err(ParseError::Truncated),
            _ => {}
        }
        buf.clear();
    }
}

/// Consume the element just opened, up to and including its end tag.
fn skip_element<R: BufRead>(reader: &mut Reader<R>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 0usize;
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => return Ok(()),
            Event::End(_) => depth -= 1,
            Event::Eof => return Err(ParseError::Truncated),
            _ => {}
        }
        buf.clear();
    }
}

/// Collect `data` entries of an open `properties` block. Scanning stops at
/// the first element that is not `data`; the rest of the block is skipped.
fn read_properties<R: BufRead>(
    reader: &mut Reader<R>,
    properties: &mut HashMap<String, String>,
) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    loop {
        let next = match reader.read_event_into(&mut buf)? {
            Event::Start(e) => Some((e.into_owned(), true)),
            Event::Empty(e) => Some((e.into_owned(), false)),
            Event::End(_) => return Ok(()),
            Event::Eof => return Err(ParseError::Truncated),
            _ => None,
        };
        buf.clear();
        let Some((element, has_content)) = next else {
            continue;
        };

        if element.local_name().as_ref() != b"data" {
            if has_content {
                skip_element(reader)?;
            }
            return skip_element(reader);
        }

        if let Some((name, value)) = data_entry(&element)? {
            properties.insert(name, value);
        }
        if has_content {
            skip_element(reader)?;
        }
    }
}

/// `name`/`value` of a `data` element. Entries without a name are dropped.
fn data_entry(element: &BytesStart<'_>) -> Result<Option<(String, String)>, ParseError> {
    let mut name = None;
    let mut value = None;
    for attr in element.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"name" => name = Some(attr.unescape_value()?.into_owned()),
            b"value" => value = Some(attr.unescape_value()?.into_owned()),
            _ => {}
        }
    }

    match name {
        Some(name) => Ok(Some((name, value.unwrap_or_default()))),
        None => {
            tracing::trace!("log4j data entry without a name, skipped");
            Ok(None)
        }
    }
}

/// Whitespace only, ignoring a leading UTF-8 byte order mark.
fn is_blank(text: &[u8]) -> bool {
    text.strip_prefix(b"\xEF\xBB\xBF")
        .unwrap_or(text)
        .iter()
        .all(u8::is_ascii_whitespace)
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
