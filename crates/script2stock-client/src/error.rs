//! Error types for the keyword service client

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the keyword service
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure (connection, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The service reported an error in the response body
    #[error("Service error: {0}")]
    Service(String),

    /// Response body was not the expected JSON
    #[error("Invalid response body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// Successful response without a `keywords` field
    #[error("Response did not contain keywords")]
    MissingKeywords,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convert ClientError to script2stock_core::Error
impl From<ClientError> for script2stock_core::Error {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(_) | ClientError::Status { .. } => {
                script2stock_core::Error::RequestFailed(err.to_string())
            }
            ClientError::Service(message) => script2stock_core::Error::Service(message),
            ClientError::InvalidBody(_) | ClientError::MissingKeywords => {
                script2stock_core::Error::UnexpectedResponse(err.to_string())
            }
            ClientError::Config(message) => script2stock_core::Error::Config(message),
        }
    }
}
