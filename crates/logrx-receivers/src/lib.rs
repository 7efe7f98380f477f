//! logrx-receivers — log receiver kinds and the registry that names them.
//!
//! A receiver reads events from some source and hands each one, as a
//! [`LogRecord`], to a caller-supplied sink. The [`registry`] maps a stable
//! identifier to every known kind so persisted configuration can refer to a
//! kind by name and get a fresh, default-configured instance back.

pub mod file;
pub mod registry;
pub mod stdin;

use std::io::BufRead;
use std::path::PathBuf;

use logrx_core::{parse_from_stream, LogRecord, ParseError};

pub use registry::{create, descriptor, list, ReceiverDescriptor};

/// Callback receiving each record. Returning an error stops the receiver.
pub type RecordSink<'a> = dyn FnMut(LogRecord) -> anyhow::Result<()> + 'a;

/// Errors raised while configuring or running a receiver.
#[derive(Debug, thiserror::Error)]
pub enum ReceiverError {
    #[error("receiver `{receiver}` has no setting `{key}`")]
    UnknownSetting { receiver: &'static str, key: String },

    #[error("invalid value {value:?} for setting `{key}`: {reason}")]
    InvalidSetting {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("setting `{0}` must be set before receiving")]
    MissingSetting(&'static str),

    #[error("could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    /// An event could not be read mid-stream.
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("record sink failed: {0}")]
    Sink(#[source] anyhow::Error),
}

/// Behaviour shared by every receiver kind.
///
/// Construction never performs I/O; sources are opened inside
/// [`Receiver::receive`].
pub trait Receiver: Send {
    /// Registry identifier of this receiver's kind.
    fn identifier(&self) -> &'static str;

    /// Current settings as name/value pairs, for presentation.
    fn settings(&self) -> Vec<(&'static str, String)>;

    /// Apply one named setting.
    fn set(&mut self, key: &str, value: &str) -> Result<(), ReceiverError>;

    /// Read the source to its end, passing every record to `sink`. Returns the
    /// number of records delivered.
    fn receive(&mut self, sink: &mut RecordSink<'_>) -> Result<usize, ReceiverError>;
}

/// A receiver kind that can be listed in the registry.
pub trait ReceiverKind: Receiver + Default + 'static {
    /// Stable identifier, persisted in configuration. Never change it.
    const IDENTIFIER: &'static str;

    /// Label shown to users. Kinds without one are shown by identifier.
    const DISPLAY_NAME: Option<&'static str> = None;
}

/// Read log4j events from `stream` until it ends cleanly.
///
/// Any failure other than a clean end of stream is returned, including a
/// malformed event: the stream position is unknown after one.
pub fn read_log4j_events<R>(
    stream: &mut R,
    default_logger: &str,
    sink: &mut RecordSink<'_>,
) -> Result<usize, ReceiverError>
where
    R: BufRead + ?Sized,
{
    let mut delivered = 0;
    loop {
        match parse_from_stream(stream, default_logger) {
            Ok(record) => {
                sink(record).map_err(ReceiverError::Sink)?;
                delivered += 1;
            }
            Err(ParseError::EndOfStream) => return Ok(delivered),
            Err(err) => {
                tracing::warn!(error = %err, delivered, "log4j stream failed");
                return Err(err.into());
            }
        }
    }
}
