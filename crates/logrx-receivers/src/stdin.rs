//! Stdin receiver — log4j XML events piped into the process.

use crate::{read_log4j_events, Receiver, ReceiverError, ReceiverKind, RecordSink};

#[derive(Debug, Clone)]
pub struct StdinReceiver {
    default_logger: String,
}

impl Default for StdinReceiver {
    fn default() -> Self {
        Self {
            default_logger: "StdinLogger".to_string(),
        }
    }
}

impl ReceiverKind for StdinReceiver {
    const IDENTIFIER: &'static str = "stdin";
}

impl Receiver for StdinReceiver {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn settings(&self) -> Vec<(&'static str, String)> {
        vec![("default_logger", self.default_logger.clone())]
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ReceiverError> {
        match key {
            "default_logger" => {
                self.default_logger = value.to_string();
                Ok(())
            }
            _ => Err(ReceiverError::UnknownSetting {
                receiver: Self::IDENTIFIER,
                key: key.to_string(),
            }),
        }
    }

    fn receive(&mut self, sink: &mut RecordSink<'_>) -> Result<usize, ReceiverError> {
        tracing::info!("reading log4j events from stdin");
        let stdin = std::io::stdin();
        let mut lock = stdin.lock();
        read_log4j_events(&mut lock, &self.default_logger, sink)
    }
}
