//! Error types for Notemirror

use thiserror::Error;

/// Result type alias for Notemirror operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Notemirror operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Git error
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// A note could not be decoded as a review request
    #[error("Failed to decode review request: {0}")]
    Decode(#[source] serde_json::Error),

    /// A review request could not be encoded as a note
    #[error("Failed to encode review request: {0}")]
    Encode(#[source] serde_json::Error),

    /// Request rejected before being written
    #[error("Invalid review request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
