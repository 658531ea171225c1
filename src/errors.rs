use std::path::PathBuf;

use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
    #[error("Unable to write to `{}`: {source}", path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed dump at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Ledger is inconsistent: {0}")]
    Inconsistent(String),
}

impl LedgerError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        LedgerError::Parse {
            line,
            message: message.into(),
        }
    }
}
