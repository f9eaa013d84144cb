//! Writing configuration records into a resource store.
//!
//! [`ConfigurationPersister`] takes a record, splits it with
//! [`decompose`](crate::parts::decompose) and writes each partition to the
//! physical path chosen by a [`NamingStrategy`]:
//!
//! - plain properties land on the configuration's own node
//! - nested records recurse as configurations at `name/key`
//! - nested record lists recurse as collections at `name/key`
//!
//! Collections are replaced wholesale. The existing children of the
//! collection parent are deleted before the items are written as
//! `item0`, `item1`, ... in input order.
//!
//! Each public write or delete commits the store exactly once, after the
//! whole tree has been staged. A failure part-way leaves the staged changes
//! uncommitted in the store; nothing is rolled back.
//!
//! All names handed to the persister are relative to the configuration root
//! of its context node, which is the node named by the context's
//! `sling:configRef` property, or the context node itself.

use tracing::{debug, trace};

use crate::{
    constants::{CONFIG_REF_PROPERTY, DEFAULT_RESOURCE_TYPE, is_reserved_property, item_label},
    naming::{NameKind, NamingStrategy},
    parts::{ConfigurationDataParts, decompose},
    path::{Path, PathBuf},
    store::{Resource, ResourceStore, StoreError},
    value::Record,
};

pub mod errors;

pub use errors::PersistError;

/// Result type for persistence operations.
pub type PersistResult<T> = std::result::Result<T, PersistError>;

/// Writes configurations below one context node.
///
/// A persister borrows its store and strategy; it is cheap to create one per
/// request.
#[derive(Clone)]
pub struct ConfigurationPersister<'a> {
    store: &'a dyn ResourceStore,
    strategy: &'a dyn NamingStrategy,
    context: PathBuf,
    root: PathBuf,
}

impl std::fmt::Debug for ConfigurationPersister<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationPersister")
            .field("strategy", &self.strategy)
            .field("context", &self.context)
            .field("root", &self.root)
            .finish()
    }
}

/// Resolves the configuration root of `context`.
///
/// # Errors
/// [`PersistError::InvalidTarget`] if no node exists at `context`.
pub fn resolve_config_root(store: &dyn ResourceStore, context: &Path) -> PersistResult<PathBuf> {
    let node = store
        .resolve(context)
        .map_err(failure(context, "resolve context"))?
        .ok_or_else(|| PersistError::InvalidTarget {
            path: context.to_path_buf(),
        })?;

    match node.property(CONFIG_REF_PROPERTY).and_then(|v| v.as_text()) {
        Some(reference) if !reference.trim().is_empty() => {
            let root = PathBuf::normalize(reference);
            trace!(context = %context, root = %root, "Following configuration reference");
            Ok(root)
        }
        _ => Ok(context.to_path_buf()),
    }
}

impl<'a> ConfigurationPersister<'a> {
    /// Creates a persister writing below the configuration root of `context`.
    ///
    /// # Errors
    /// [`PersistError::InvalidTarget`] if no node exists at `context`.
    pub fn new(
        store: &'a dyn ResourceStore,
        strategy: &'a dyn NamingStrategy,
        context: &Path,
    ) -> PersistResult<Self> {
        let root = resolve_config_root(store, context)?;
        Ok(Self {
            store,
            strategy,
            context: context.to_path_buf(),
            root,
        })
    }

    /// The context node this persister writes for.
    pub fn context(&self) -> &Path {
        &self.context
    }

    /// The path all configuration names are resolved against.
    pub fn config_root(&self) -> &Path {
        &self.root
    }

    /// Absolute physical path of `name` for the given kind.
    pub fn physical_path(&self, kind: NameKind, name: &Path) -> PathBuf {
        self.root
            .to_path_buf()
            .join(self.strategy.physical_name(kind, name))
    }

    /// Persists `values` as the configuration `name` and commits.
    pub fn write_configuration(&self, name: &Path, values: Record) -> PersistResult<()> {
        debug!(context = %self.context, name = %name, "Writing configuration");
        self.persist_configuration(name, values)?;
        self.commit()
    }

    /// Persists `items` as the configuration collection `name` and commits.
    ///
    /// Any existing items of the collection are removed first.
    pub fn write_configuration_collection(
        &self,
        name: &Path,
        items: Vec<Record>,
    ) -> PersistResult<()> {
        debug!(
            context = %self.context,
            name = %name,
            items = items.len(),
            "Writing configuration collection"
        );
        self.persist_collection(name, items, None)?;
        self.commit()
    }

    /// Like [`write_configuration_collection`](Self::write_configuration_collection)
    /// but also stores container-scoped `properties` on the collection's
    /// auxiliary properties node.
    pub fn write_configuration_collection_with_properties(
        &self,
        name: &Path,
        items: Vec<Record>,
        properties: Record,
    ) -> PersistResult<()> {
        debug!(
            context = %self.context,
            name = %name,
            items = items.len(),
            properties = properties.len(),
            "Writing configuration collection with properties"
        );
        self.persist_collection(name, items, Some(properties))?;
        self.commit()
    }

    /// Removes the configuration `name` with everything below it and commits.
    ///
    /// Deleting a configuration that does not exist is not an error.
    pub fn delete_configuration(&self, name: &Path) -> PersistResult<()> {
        let logical = self.root.to_path_buf().join(name);
        let physical = self.physical_path(NameKind::Resource, name);

        let mut deleted = self.delete_if_present(&logical)?;
        if !physical.starts_with(&logical) {
            deleted |= self.delete_if_present(&physical)?;
        }
        debug!(context = %self.context, name = %name, deleted, "Deleted configuration");
        self.commit()
    }

    /// Reads back the plain properties of the configuration `name`.
    ///
    /// Reserved properties are left out. Returns `None` if nothing was
    /// written there.
    pub fn read_configuration(&self, name: &Path) -> PersistResult<Option<Record>> {
        let path = self.physical_path(NameKind::Resource, name);
        let node = self.store.resolve(&path).map_err(failure(&path, "read"))?;
        Ok(node.map(|node| user_properties(&node)))
    }

    /// Reads back the items of the configuration collection `name` in order,
    /// paired with their labels.
    ///
    /// The auxiliary properties node is not an item. A missing collection
    /// reads as empty.
    pub fn read_configuration_collection(
        &self,
        name: &Path,
    ) -> PersistResult<Vec<(String, Record)>> {
        let parent_name = self.strategy.physical_name(NameKind::CollectionParent, name);
        let parent_path = self.root.to_path_buf().join(&parent_name);
        let Some(parent) = self
            .store
            .resolve(&parent_path)
            .map_err(failure(&parent_path, "read"))?
        else {
            return Ok(Vec::new());
        };

        let properties_path = self
            .root
            .to_path_buf()
            .join(self.strategy.collection_properties_name(&parent_name));

        let children = self
            .store
            .children(&parent)
            .map_err(failure(&parent_path, "list children"))?;

        let mut items = Vec::with_capacity(children.len());
        for child in children {
            if child.path() == &*properties_path {
                continue;
            }
            let Some(label) = child.name() else { continue };
            let item_path = self.physical_path(NameKind::CollectionItem, &parent_name.child(label));
            let properties = self
                .store
                .resolve(&item_path)
                .map_err(failure(&item_path, "read"))?
                .map(|node| user_properties(&node))
                .unwrap_or_default();
            items.push((label.to_string(), properties));
        }
        Ok(items)
    }

    /// Reads back the container-scoped properties of the collection `name`.
    pub fn read_collection_properties(&self, name: &Path) -> PersistResult<Option<Record>> {
        let parent_name = self.strategy.physical_name(NameKind::CollectionParent, name);
        let path = self
            .root
            .to_path_buf()
            .join(self.strategy.collection_properties_name(&parent_name));
        let node = self.store.resolve(&path).map_err(failure(&path, "read"))?;
        Ok(node.map(|node| user_properties(&node)))
    }

    fn persist_configuration(&self, name: &Path, values: Record) -> PersistResult<()> {
        let ConfigurationDataParts {
            values,
            nested_records,
            nested_collections,
        } = decompose(values);

        let path = self.physical_path(NameKind::Resource, name);
        self.write_node(&path, &values)?;

        for (key, record) in nested_records {
            self.persist_configuration(&name.child(&key), record)?;
        }
        for (key, items) in nested_collections {
            self.persist_collection(&name.child(&key), items, None)?;
        }
        Ok(())
    }

    fn persist_collection(
        &self,
        name: &Path,
        items: Vec<Record>,
        properties: Option<Record>,
    ) -> PersistResult<()> {
        let items: Vec<(String, ConfigurationDataParts)> = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (item_label(index), decompose(item)))
            .collect();

        let parent_name = self.strategy.physical_name(NameKind::CollectionParent, name);
        let parent_path = self.root.to_path_buf().join(&parent_name);
        let parent = self
            .store
            .get_or_create(&parent_path, DEFAULT_RESOURCE_TYPE)
            .map_err(failure(&parent_path, "create"))?;
        self.replace_properties(&parent, &Record::new())?;

        let existing = self
            .store
            .children(&parent)
            .map_err(failure(&parent_path, "list children"))?;
        let removed = existing.len();
        for child in existing {
            self.store
                .delete(&child)
                .map_err(failure(child.path(), "delete"))?;
        }
        trace!(path = %parent_path, removed, "Cleared collection parent");

        for (label, parts) in &items {
            let path = self.physical_path(NameKind::CollectionItem, &parent_name.child(label));
            self.write_node(&path, &parts.values)?;
        }

        if let Some(properties) = properties {
            let path = self
                .root
                .to_path_buf()
                .join(self.strategy.collection_properties_name(&parent_name));
            self.write_node(&path, &properties)?;
        }

        // Nested children hang off the same base as their item so that
        // clearing the parent also clears them.
        for (label, parts) in items {
            let item_name = parent_name.child(&label);
            for (key, record) in parts.nested_records {
                self.persist_configuration(&item_name.child(&key), record)?;
            }
            for (key, nested) in parts.nested_collections {
                self.persist_collection(&item_name.child(&key), nested, None)?;
            }
        }
        Ok(())
    }

    fn write_node(&self, path: &Path, values: &Record) -> PersistResult<()> {
        let node = self
            .store
            .get_or_create(path, DEFAULT_RESOURCE_TYPE)
            .map_err(failure(path, "create"))?;
        self.replace_properties(&node, values)?;
        trace!(path = %path, properties = values.len(), "Wrote configuration node");
        Ok(())
    }

    fn replace_properties(&self, node: &Resource, values: &Record) -> PersistResult<()> {
        self.store
            .replace_properties(node, values)
            .map_err(|source| {
                if source.is_read_only() {
                    PersistError::PropertyAdaptationFailure {
                        path: node.path().to_path_buf(),
                        source,
                    }
                } else {
                    PersistError::PersistenceFailure {
                        path: node.path().to_path_buf(),
                        operation: "replace properties".to_string(),
                        source,
                    }
                }
            })
    }

    fn delete_if_present(&self, path: &Path) -> PersistResult<bool> {
        match self.store.resolve(path).map_err(failure(path, "resolve"))? {
            Some(node) => {
                self.store.delete(&node).map_err(failure(path, "delete"))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn commit(&self) -> PersistResult<()> {
        self.store.commit().map_err(failure(&self.root, "commit"))
    }
}

fn failure<'p>(
    path: &'p Path,
    operation: &'static str,
) -> impl FnOnce(StoreError) -> PersistError + 'p {
    move |source| PersistError::PersistenceFailure {
        path: path.to_path_buf(),
        operation: operation.to_string(),
        source,
    }
}

fn user_properties(node: &Resource) -> Record {
    let mut properties = node.properties().clone();
    properties.retain(|key, _| !is_reserved_property(key));
    properties
}
