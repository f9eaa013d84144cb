//! Hierarchical resource store.
//!
//! This module provides the [`ResourceStore`] trait consumed by the
//! persister and an in-memory implementation.
//!
//! A store is a tree of named nodes addressed by [`Path`]. Every node has a
//! resource type and a property map. Mutations are staged in the store's
//! working state and become durable on [`ResourceStore::commit`].

use crate::{
    path::{Path, PathBuf},
    value::{Record, Value},
};

pub mod errors;
pub mod in_memory;

pub use errors::StoreError;
pub use in_memory::InMemory;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A snapshot of one node of the store.
///
/// Resources are owned copies; mutating the store does not update
/// previously returned resources.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    path: PathBuf,
    resource_type: String,
    properties: Record,
}

impl Resource {
    /// Creates a resource snapshot.
    pub fn new(path: PathBuf, resource_type: impl Into<String>, properties: Record) -> Self {
        Self {
            path,
            resource_type: resource_type.into(),
            properties,
        }
    }

    /// The node's path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The node's own name, or `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.path.file_name()
    }

    /// The node's resource type.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// All properties, reserved ones included.
    pub fn properties(&self) -> &Record {
        &self.properties
    }

    /// Gets a single property.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// Storage abstraction for the resource tree.
///
/// All implementations must be `Send` and `Sync`. Operations are
/// synchronous. Implementations provide no coordination between concurrent
/// writers to overlapping paths.
pub trait ResourceStore: Send + Sync {
    /// Looks up the node at `path`.
    ///
    /// # Returns
    /// `Ok(None)` if no node exists there.
    fn resolve(&self, path: &Path) -> StoreResult<Option<Resource>>;

    /// Returns the node at `path`, creating it and any missing ancestors
    /// with `resource_type` if necessary.
    fn get_or_create(&self, path: &Path, resource_type: &str) -> StoreResult<Resource>;

    /// Replaces the node's properties.
    ///
    /// Every property outside the reserved namespace is removed before the
    /// given properties are set. Reserved properties survive unless
    /// `properties` overwrites them.
    ///
    /// # Errors
    /// `StoreError::ReadOnly` if the node cannot be adapted for mutation.
    fn replace_properties(&self, node: &Resource, properties: &Record) -> StoreResult<()>;

    /// Lists the node's children in insertion order.
    fn children(&self, node: &Resource) -> StoreResult<Vec<Resource>>;

    /// Deletes the node and its whole subtree.
    fn delete(&self, node: &Resource) -> StoreResult<()>;

    /// Makes all staged changes durable.
    fn commit(&self) -> StoreResult<()>;
}

impl<S: ResourceStore + ?Sized> ResourceStore for std::sync::Arc<S> {
    fn resolve(&self, path: &Path) -> StoreResult<Option<Resource>> {
        (**self).resolve(path)
    }

    fn get_or_create(&self, path: &Path, resource_type: &str) -> StoreResult<Resource> {
        (**self).get_or_create(path, resource_type)
    }

    fn replace_properties(&self, node: &Resource, properties: &Record) -> StoreResult<()> {
        (**self).replace_properties(node, properties)
    }

    fn children(&self, node: &Resource) -> StoreResult<Vec<Resource>> {
        (**self).children(node)
    }

    fn delete(&self, node: &Resource) -> StoreResult<()> {
        (**self).delete(node)
    }

    fn commit(&self) -> StoreResult<()> {
        (**self).commit()
    }
}
