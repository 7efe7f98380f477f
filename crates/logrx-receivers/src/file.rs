//! File receiver — reads a log file from start to end.
//!
//! Two formats are understood: a sequence of log4j XML events (as written by
//! log4j's `XMLLayout`), or flat text with one record per line.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::str::FromStr;

use logrx_core::normalizer::normalize_line;

use crate::{read_log4j_events, Receiver, ReceiverError, ReceiverKind, RecordSink};

/// Layout of the records inside the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFormat {
    #[default]
    Log4jXml,
    Flat,
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Log4jXml => write!(f, "log4j-xml"),
            FileFormat::Flat => write!(f, "flat"),
        }
    }
}

impl FromStr for FileFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "log4j-xml" => Ok(FileFormat::Log4jXml),
            "flat" => Ok(FileFormat::Flat),
            other => Err(format!("expected `log4j-xml` or `flat`, got `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileReceiver {
    path: Option<PathBuf>,
    format: FileFormat,
    default_logger: String,
}

impl Default for FileReceiver {
    fn default() -> Self {
        Self {
            path: None,
            format: FileFormat::default(),
            default_logger: "FileLogger".to_string(),
        }
    }
}

impl FileReceiver {
    pub fn new(path: impl Into<PathBuf>, format: FileFormat) -> Self {
        Self {
            path: Some(path.into()),
            format,
            ..Self::default()
        }
    }

    fn read_flat(&self, reader: impl BufRead, sink: &mut RecordSink<'_>) -> Result<usize, ReceiverError> {
        let mut delivered = 0;
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            sink(normalize_line(&line, &self.default_logger)).map_err(ReceiverError::Sink)?;
            delivered += 1;
        }
        Ok(delivered)
    }
}

impl ReceiverKind for FileReceiver {
    const IDENTIFIER: &'static str = "file";
    const DISPLAY_NAME: Option<&'static str> = Some("Log File");
}

impl Receiver for FileReceiver {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn settings(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "path",
                self.path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            ("format", self.format.to_string()),
            ("default_logger", self.default_logger.clone()),
        ]
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ReceiverError> {
        match key {
            "path" => self.path = (!value.is_empty()).then(|| PathBuf::from(value)),
            "format" => {
                self.format = value.parse().map_err(|reason| ReceiverError::InvalidSetting {
                    key: "format",
                    value: value.to_string(),
                    reason,
                })?
            }
            "default_logger" => self.default_logger = value.to_string(),
            _ => {
                return Err(ReceiverError::UnknownSetting {
                    receiver: Self::IDENTIFIER,
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    fn receive(&mut self, sink: &mut RecordSink<'_>) -> Result<usize, ReceiverError> {
        let path = self.path.as_ref().ok_or(ReceiverError::MissingSetting("path"))?;
        let file = File::open(path).map_err(|source| ReceiverError::Open {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), format = %self.format, "reading log file");

        let mut reader = BufReader::new(file);
        let delivered = match self.format {
            FileFormat::Log4jXml => read_log4j_events(&mut reader, &self.default_logger, sink)?,
            FileFormat::Flat => self.read_flat(reader, sink)?,
        };
        tracing::info!(path = %path.display(), delivered, "log file exhausted");
        Ok(delivered)
    }
}
