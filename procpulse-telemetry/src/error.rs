//! Error types for the telemetry pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while sampling the kernel counter source.
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The counter source could not be opened or read.
    #[error("counter source {} unavailable: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The aggregate counter row was missing or malformed.
    #[error("malformed counter data: {0}")]
    ParseError(String),
}

/// Result type alias for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;
