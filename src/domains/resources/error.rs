//! Resource-specific error types.

use thiserror::Error;

/// Errors that can occur while building or reading the resource tree.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource exists at the requested path.
    #[error("Resource not found: {0}")]
    PathNotFound(String),

    /// The resource exists but does not support reads.
    #[error("Operation not supported on {0}")]
    UnsupportedOperation(String),

    /// Two siblings share the same path segment.
    #[error("Duplicate resource segment '{segment}' under '{parent}'")]
    DuplicateSegment { parent: String, segment: String },

    /// A path segment is empty or contains a separator.
    #[error("Invalid resource segment: '{0}'")]
    InvalidSegment(String),
}

impl ResourceError {
    /// Create a new "path not found" error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::PathNotFound(path.into())
    }

    /// Create a new "unsupported operation" error.
    pub fn unsupported(path: impl Into<String>) -> Self {
        Self::UnsupportedOperation(path.into())
    }

    /// Whether this error stems from a malformed tree rather than a request.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DuplicateSegment { .. } | Self::InvalidSegment(_)
        )
    }
}
