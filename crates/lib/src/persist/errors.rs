//! Error types for configuration persistence.
//!
//! Every store failure is wrapped together with the physical path and the
//! operation that failed, so a caller can tell which sub-path of a deep
//! recursive write broke.

use thiserror::Error;

use crate::{path::PathBuf, store::StoreError};

/// Errors that can occur while persisting configurations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PersistError {
    /// The context path of a write does not resolve to an existing node.
    #[error("No resource found at context path: {path}")]
    InvalidTarget {
        /// The context path that did not resolve
        path: PathBuf,
    },

    /// The store failed to create, modify, delete or commit.
    #[error("Unable to {operation} configuration at {path}")]
    PersistenceFailure {
        /// The physical path being operated on
        path: PathBuf,
        /// The store operation that failed
        operation: String,
        /// The underlying store error
        #[source]
        source: StoreError,
    },

    /// The node could not be adapted into a mutable property view.
    #[error("Unable to modify properties of configuration at {path}")]
    PropertyAdaptationFailure {
        /// The physical path of the node
        path: PathBuf,
        /// The underlying store error
        #[source]
        source: StoreError,
    },
}

impl PersistError {
    /// Check if the write target did not exist.
    pub fn is_invalid_target(&self) -> bool {
        matches!(self, PersistError::InvalidTarget { .. })
    }

    /// Check if the store failed. Property adaptation failures count as
    /// persistence failures.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(
            self,
            PersistError::PersistenceFailure { .. } | PersistError::PropertyAdaptationFailure { .. }
        )
    }

    /// Check if a node's properties could not be modified.
    pub fn is_property_adaptation_failure(&self) -> bool {
        matches!(self, PersistError::PropertyAdaptationFailure { .. })
    }

    /// The path the failure relates to.
    pub fn path(&self) -> &PathBuf {
        match self {
            PersistError::InvalidTarget { path }
            | PersistError::PersistenceFailure { path, .. }
            | PersistError::PropertyAdaptationFailure { path, .. } => path,
        }
    }

    /// The failed operation, for persistence failures.
    pub fn operation(&self) -> Option<&str> {
        match self {
            PersistError::PersistenceFailure { operation, .. } => Some(operation),
            PersistError::PropertyAdaptationFailure { .. } => Some("replace properties"),
            PersistError::InvalidTarget { .. } => None,
        }
    }

    /// The underlying store error, if any.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            PersistError::PersistenceFailure { source, .. }
            | PersistError::PropertyAdaptationFailure { source, .. } => Some(source),
            PersistError::InvalidTarget { .. } => None,
        }
    }
}

// Conversion from PersistError to the main Error type
impl From<PersistError> for crate::Error {
    fn from(err: PersistError) -> Self {
        crate::Error::Persist(err)
    }
}
