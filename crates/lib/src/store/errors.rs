//! Error types for the resource store.
//!
//! This module defines structured error types for store operations, carrying
//! the path being operated on wherever one exists.

use thiserror::Error;

use crate::path::PathBuf;

/// Errors that can occur during resource store operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// No node exists at the given path.
    #[error("Node not found: {path}")]
    NodeNotFound {
        /// The path that did not resolve
        path: PathBuf,
    },

    /// The node exists but its properties cannot be modified.
    #[error("Node is read-only: {path}")]
    ReadOnly {
        /// The path of the read-only node
        path: PathBuf,
    },

    /// The path cannot be used for the requested operation.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// The offending path
        path: PathBuf,
        /// Why the path was rejected
        reason: String,
    },

    /// Serialization failed.
    #[error("Serialization failed")]
    SerializationFailed {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization failed.
    #[error("Deserialization failed")]
    DeserializationFailed {
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// File I/O error.
    #[error("File I/O error")]
    FileIo {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A store lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Check if this error indicates a node was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NodeNotFound { .. })
    }

    /// Check if this error indicates a node cannot be mutated.
    pub fn is_read_only(&self) -> bool {
        matches!(self, StoreError::ReadOnly { .. })
    }

    /// Check if this error is related to I/O operations.
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            StoreError::FileIo { .. }
                | StoreError::SerializationFailed { .. }
                | StoreError::DeserializationFailed { .. }
        )
    }

    /// Get the path if this error is about a specific node.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            StoreError::NodeNotFound { path }
            | StoreError::ReadOnly { path }
            | StoreError::InvalidPath { path, .. } => Some(path),
            _ => None,
        }
    }
}

// Conversion from StoreError to the main Error type
impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
