//! Error types for harmonize.

use thiserror::Error;

/// Result type alias for harmonize operations.
pub type Result<T> = std::result::Result<T, HarmonizeError>;

/// Errors that can occur while querying the datastore.
#[derive(Error, Debug)]
pub enum HarmonizeError {
    /// Stream name is not in the registry.
    #[error("Unknown stream: {0}")]
    UnknownStream(String),

    /// Invalid date filter.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Network-level failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The datastore answered with `success: false`.
    #[error("API error: {0}")]
    Api(String),

    /// The response body was not a well-formed datastore envelope.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output format error.
    #[error("Format error: {0}")]
    Format(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error for date filters that cannot be built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Neither a start nor an end date was given.
    #[error("A start and/or end date should be passed")]
    MissingBounds,
}

/// Network failures raised by a transport.
///
/// Transports never retry; the first failure is surfaced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request did not complete before the timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Connection could not be established (DNS, refused, TLS).
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Any other failure while sending the request or reading the body.
    #[error("HTTP error: {0}")]
    Request(String),
}

impl HarmonizeError {
    /// Returns true if this error was reported by the datastore itself.
    #[must_use]
    pub const fn is_api(&self) -> bool {
        matches!(self, Self::Api(_))
    }

    /// Returns true if this error is a network failure.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
