//!
//! caconf: context-aware configuration persistence.
//! This library writes nested configuration records into a hierarchical resource store.
//!
//! ## Core Concepts
//!
//! * **Records (`value::Record`)**: String-keyed maps of configuration values. A value may be a scalar, a flat list, a nested record or a list of records.
//! * **Decomposition (`parts::decompose`)**: Splits one record into plain properties, nested records and nested collections.
//! * **Naming strategies (`naming::NamingStrategy`)**: Map logical configuration names to physical store paths, separately for plain configurations, collection parents and collection items.
//! * **Resource stores (`store::ResourceStore`)**: A pluggable tree of nodes with properties and an explicit commit. `store::InMemory` is the bundled implementation, optionally backed by a JSON file.
//! * **Persister (`persist::ConfigurationPersister`)**: Walks a decomposed record, writes every node at its physical path and commits once per call.
//! * **Façade (`ContextAwareConfig`)**: Owns a store, a strategy and a `metadata::SchemaRegistry`, and resolves typed configurations to names.

pub mod constants;
pub mod context;
pub mod metadata;
pub mod naming;
pub mod parts;
pub mod path;
pub mod persist;
pub mod store;
pub mod value;

/// Re-export the façade for easier access.
pub use context::ContextAwareConfig;
pub use value::{Record, Value};

/// Result type used throughout the caconf library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the caconf library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured store errors from the store module
    #[error(transparent)]
    Store(store::StoreError),

    /// Structured persistence errors from the persist module
    #[error(transparent)]
    Persist(persist::PersistError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Store(_) => "store",
            Error::Persist(_) => "persist",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_not_found(),
            Error::Persist(persist_err) => {
                persist_err.is_invalid_target()
                    || persist_err.store_error().is_some_and(|e| e.is_not_found())
            }
            _ => false,
        }
    }

    /// Check if the write target did not resolve.
    pub fn is_invalid_target(&self) -> bool {
        match self {
            Error::Persist(persist_err) => persist_err.is_invalid_target(),
            _ => false,
        }
    }

    /// Check if the store failed while persisting.
    pub fn is_persistence_failure(&self) -> bool {
        match self {
            Error::Persist(persist_err) => persist_err.is_persistence_failure(),
            Error::Store(_) => true,
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Store(store_err) => store_err.is_io_error(),
            Error::Persist(persist_err) => persist_err.store_error().is_some_and(|e| e.is_io_error()),
            _ => false,
        }
    }

    /// Check if this error is serialization related.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Serialize(_))
    }
}
