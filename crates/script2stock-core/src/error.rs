//! Error types for script2stock-core

use thiserror::Error;

/// Result type alias for script2stock-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for keyword generation and result browsing
#[derive(Error, Debug)]
pub enum Error {
    /// The script was empty or whitespace-only
    #[error("Script text is empty")]
    EmptyInput,

    /// A generation request is already in flight
    #[error("A generation request is already in progress")]
    Busy,

    /// Request failed at the transport or HTTP status level
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The service answered with an `error` field
    #[error("Service error: {0}")]
    Service(String),

    /// The service answered with a body we could not use
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Unknown stock platform identifier
    #[error("Unknown platform: {0} (expected storyblocks, pexels or pixabay)")]
    UnknownPlatform(String),

    /// Unknown overlay frequency
    #[error("Unknown overlay frequency: {0} (expected low, medium or high)")]
    UnknownOverlayFrequency(String),

    /// A result line index outside the current results
    #[error("Line {index} is out of range ({len} lines)")]
    LineOutOfRange { index: usize, len: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error belongs to the request-failure family.
    ///
    /// All of these collapse to the same user-facing alert.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed(_) | Self::Service(_) | Self::UnexpectedResponse(_)
        )
    }
}
