//! Error types for the evaluation harness
//!
//! Only resource and configuration failures are errors. Cooperative
//! cancellation and stream exhaustion are regular outcomes and never
//! surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for flujo operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by tasks, sinks and configuration loading.
#[derive(Debug, Error)]
pub enum Error {
    /// The incremental dump file could not be opened or written.
    #[error("Unable to write immediate result file: {path}")]
    DumpFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The prediction output file could not be opened or written.
    #[error("Unable to write prediction result file: {path}")]
    PredictionFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error with context.
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration parsed but holds invalid values.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] crate::config::ValidationError),

    /// Result serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
