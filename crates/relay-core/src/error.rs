use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// All errors produced by the relay.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The HTTP request to the backend could not be completed.
    #[error("Backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered, but not with a success status.
    #[error("Backend returned HTTP {status} for {endpoint}")]
    BackendStatus { endpoint: String, status: u16 },

    /// A bounded operation did not finish in time.
    #[error("{operation} timed out after {elapsed:?}")]
    Timeout {
        operation: &'static str,
        elapsed: Duration,
    },

    /// The coordinator task is gone; no further messages can be delivered.
    #[error("Coordinator channel closed")]
    ChannelClosed,

    /// The coordinator dropped a request without replying.
    #[error("No reply received for {0}")]
    NoReply(&'static str),

    /// The coordinator replied with a shape that does not match the request.
    #[error("Unexpected reply to {0}")]
    UnexpectedReply(&'static str),

    /// The host environment could not report the active tab.
    #[error("Active tab unavailable: {0}")]
    TabUnavailable(String),

    /// The page source could not be read.
    #[error("Failed to read page source {path}: {source}")]
    PageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the relay crates.
pub type Result<T> = std::result::Result<T, RelayError>;
