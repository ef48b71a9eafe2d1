//! Typed errors for command input and the media pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Error type used by every dispatcher endpoint.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
/// Result type returned by command handlers.
pub type HandlerResult = Result<(), HandlerError>;

/// Rejections of `/remind` arguments. Nothing is persisted when one occurs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReminderInputError {
    /// Missing reminder text or timestamp.
    #[error("Usage: /remind <text> <YYYY-MM-DD HH:MM>")]
    Usage,
    /// The trailing timestamp did not match `YYYY-MM-DD HH:MM`.
    #[error("Invalid time '{0}'. Use the YYYY-MM-DD HH:MM format, e.g. 2023-10-31 12:00")]
    InvalidTime(String),
}

/// Rejections of the `/download_mp3` link.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Link cannot be empty")]
    Empty,
    #[error("'{0}' is not a valid link")]
    Malformed(String),
    #[error("Only http and https links are supported, got '{0}'")]
    UnsupportedScheme(String),
}

/// Failures of the download, transcode and read steps.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to start {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },
    #[error("{tool} did not finish within {secs}s")]
    Timeout { tool: String, secs: u64 },
    #[error("expected output was not produced in {0}")]
    MissingOutput(PathBuf),
}
