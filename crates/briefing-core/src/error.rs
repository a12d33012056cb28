//! Error types for the briefing core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a mail/calendar source.
///
/// The pipeline never propagates these; a failing source degrades to an
/// empty sequence.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The export file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export file is not valid JSON.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The export parsed but is not a list of records.
    #[error("invalid export {path}: {message}")]
    InvalidExport { path: PathBuf, message: String },

    /// The source is not configured or cannot be reached.
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by the completion endpoint.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// API key not configured.
    #[error("Anthropic API key not set")]
    NoApiKey,

    /// Transport-level failure (DNS, TLS, connection reset).
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// The endpoint answered with a non-success status.
    #[error("{status} - Response: {body}")]
    Status { status: u16, body: String },

    /// The body could not be decoded as JSON.
    #[error("failed to parse response: {0}")]
    ParseError(String),

    /// The JSON decoded but carried no text payload.
    #[error("unexpected response shape")]
    UnexpectedResponse,
}

/// Result type for source operations.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Result type for completion operations.
pub type CompletionResult<T> = std::result::Result<T, CompletionError>;
