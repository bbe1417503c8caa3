//! Directory-specific error types.

use thiserror::Error;

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Transport-level faults while talking to the resource directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The configured directory address cannot be used.
    #[error("Invalid directory address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The HTTP request could not be completed.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The directory could not be reached.
    #[error("Directory unreachable: {0}")]
    Unreachable(String),

    /// The directory answered with a body that could not be understood.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl DirectoryError {
    /// Create an invalid address error.
    pub fn invalid_address(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// Create an unreachable error.
    pub fn unreachable(msg: impl Into<String>) -> Self {
        Self::Unreachable(msg.into())
    }

    /// Create a malformed response error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}
