//! Error types and handling for the device server.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and the transport, providing consistent error handling across
//! the entire application.

use thiserror::Error;

use super::transport::TransportError;
use crate::domains::{directory::DirectoryError, resources::ResourceError};

/// A specialized Result type for device server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the device server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the resources domain.
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Error originating from the directory domain.
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Error originating from the transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl Error {
    /// Whether the error is a startup configuration problem.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Directory(DirectoryError::InvalidAddress { .. }) => true,
            Self::Resource(e) => e.is_configuration(),
            _ => false,
        }
    }
}
