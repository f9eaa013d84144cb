//! In-memory resource store implementation
//!
//! This module provides an in-memory implementation of the ResourceStore
//! trait, suitable for testing, development, or small tools that persist the
//! whole tree to a JSON file.

mod persistence;

use std::{
    collections::BTreeMap,
    path::{Path as FsPath, PathBuf as FsPathBuf},
    sync::{
        RwLock, RwLockReadGuard, RwLockWriteGuard,
        atomic::{AtomicUsize, Ordering},
    },
};

use serde::{Deserialize, Serialize};

use super::{Resource, ResourceStore, StoreError, StoreResult};
use crate::{
    constants::{DEFAULT_RESOURCE_TYPE, is_reserved_property},
    path::{Path, PathBuf},
    value::Record,
};

fn is_false(b: &bool) -> bool {
    !*b
}

/// One node of the tree as held in memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Node {
    pub(crate) resource_type: String,
    #[serde(default)]
    pub(crate) properties: Record,
    /// Child names in insertion order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) children: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub(crate) read_only: bool,
}

impl Node {
    fn new(resource_type: &str) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            properties: Record::new(),
            children: Vec::new(),
            read_only: false,
        }
    }
}

/// All nodes keyed by path; the root lives at the empty path.
pub(crate) type Tree = BTreeMap<PathBuf, Node>;

fn empty_tree() -> Tree {
    let mut tree = Tree::new();
    tree.insert(PathBuf::new(), Node::new(DEFAULT_RESOURCE_TYPE));
    tree
}

fn snapshot(path: &Path, node: &Node) -> Resource {
    Resource::new(
        path.to_path_buf(),
        node.resource_type.clone(),
        node.properties.clone(),
    )
}

/// A simple in-memory store.
///
/// Mutations go to a working tree that all reads observe. [`commit`]
/// copies the working tree into the committed snapshot and, when a
/// write-back file is configured, saves that snapshot as JSON.
///
/// [`commit`]: ResourceStore::commit
#[derive(Debug)]
pub struct InMemory {
    /// Working state, visible to all reads
    pub(crate) working: RwLock<Tree>,
    /// State as of the last successful commit
    pub(crate) committed: RwLock<Tree>,
    /// JSON file written on every commit
    write_back: Option<FsPathBuf>,
    /// Number of successful commits
    commits: AtomicUsize,
}

impl InMemory {
    /// Creates a new store containing only the root node.
    pub fn new() -> Self {
        Self::from_tree(empty_tree())
    }

    pub(crate) fn from_tree(tree: Tree) -> Self {
        Self {
            working: RwLock::new(tree.clone()),
            committed: RwLock::new(tree),
            write_back: None,
            commits: AtomicUsize::new(0),
        }
    }

    /// Saves the committed tree to `file` on every commit.
    pub fn with_write_back(mut self, file: impl AsRef<FsPath>) -> Self {
        self.write_back = Some(file.as_ref().to_path_buf());
        self
    }

    /// The configured write-back file, if any.
    pub fn write_back(&self) -> Option<&FsPath> {
        self.write_back.as_deref()
    }

    /// Loads a store from a JSON file written by [`InMemory::save_to_file`].
    ///
    /// If the file does not exist, a new, empty store is returned.
    pub fn load_from_file(file: impl AsRef<FsPath>) -> StoreResult<Self> {
        match persistence::read_tree(file.as_ref())? {
            Some(tree) => Ok(Self::from_tree(tree)),
            None => Ok(Self::new()),
        }
    }

    /// Saves the committed tree to `file` as JSON.
    pub fn save_to_file(&self, file: impl AsRef<FsPath>) -> StoreResult<()> {
        let committed = self.read_committed()?;
        persistence::write_tree(file.as_ref(), &committed)
    }

    /// Number of successful commits since creation.
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Creates (or reuses) the node at `path` and sets its properties.
    ///
    /// Changes are staged like any other mutation.
    pub fn create_resource(
        &self,
        path: &Path,
        resource_type: &str,
        properties: &Record,
    ) -> StoreResult<Resource> {
        let node = self.get_or_create(path, resource_type)?;
        self.replace_properties(&node, properties)?;
        self.resolve(path)?
            .ok_or_else(|| StoreError::NodeNotFound {
                path: path.to_path_buf(),
            })
    }

    /// Marks a node as (not) adaptable for property mutation.
    pub fn set_read_only(&self, path: &Path, read_only: bool) -> StoreResult<()> {
        let mut working = self.write_working()?;
        let node = working.get_mut(path).ok_or_else(|| StoreError::NodeNotFound {
            path: path.to_path_buf(),
        })?;
        node.read_only = read_only;
        Ok(())
    }

    /// Looks up `path` in the last committed snapshot.
    pub fn resolve_committed(&self, path: &Path) -> StoreResult<Option<Resource>> {
        let committed = self.read_committed()?;
        Ok(committed.get(path).map(|node| snapshot(path, node)))
    }

    /// Discards all staged changes since the last commit.
    pub fn revert(&self) -> StoreResult<()> {
        let committed = self.read_committed()?.clone();
        *self.write_working()? = committed;
        Ok(())
    }

    /// All paths at or below `base` in the working tree, in path order.
    pub fn paths_below(&self, base: &Path) -> StoreResult<Vec<PathBuf>> {
        let working = self.read_working()?;
        Ok(working
            .keys()
            .filter(|path| path.starts_with(base))
            .cloned()
            .collect())
    }

    fn read_working(&self) -> StoreResult<RwLockReadGuard<'_, Tree>> {
        self.working.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write_working(&self) -> StoreResult<RwLockWriteGuard<'_, Tree>> {
        self.working.write().map_err(|_| StoreError::LockPoisoned)
    }

    fn read_committed(&self) -> StoreResult<RwLockReadGuard<'_, Tree>> {
        self.committed.read().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for InMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceStore for InMemory {
    fn resolve(&self, path: &Path) -> StoreResult<Option<Resource>> {
        let working = self.read_working()?;
        Ok(working.get(path).map(|node| snapshot(path, node)))
    }

    fn get_or_create(&self, path: &Path, resource_type: &str) -> StoreResult<Resource> {
        let mut working = self.write_working()?;

        let mut current = PathBuf::new();
        for segment in path.components() {
            let next = current.child(segment);
            if !working.contains_key(&next) {
                let parent = working
                    .get_mut(&current)
                    .ok_or_else(|| StoreError::NodeNotFound {
                        path: current.clone(),
                    })?;
                parent.children.push(segment.to_string());
                working.insert(next.clone(), Node::new(resource_type));
                tracing::trace!(path = %next, resource_type, "Created node");
            }
            current = next;
        }

        working
            .get(path)
            .map(|node| snapshot(path, node))
            .ok_or_else(|| StoreError::NodeNotFound {
                path: path.to_path_buf(),
            })
    }

    fn replace_properties(&self, node: &Resource, properties: &Record) -> StoreResult<()> {
        let mut working = self.write_working()?;
        let stored = working
            .get_mut(node.path())
            .ok_or_else(|| StoreError::NodeNotFound {
                path: node.path().to_path_buf(),
            })?;
        if stored.read_only {
            return Err(StoreError::ReadOnly {
                path: node.path().to_path_buf(),
            });
        }

        stored.properties.retain(|key, _| is_reserved_property(key));
        stored
            .properties
            .extend(properties.iter().map(|(k, v)| (k, v.clone())));
        Ok(())
    }

    fn children(&self, node: &Resource) -> StoreResult<Vec<Resource>> {
        let working = self.read_working()?;
        let stored = working
            .get(node.path())
            .ok_or_else(|| StoreError::NodeNotFound {
                path: node.path().to_path_buf(),
            })?;

        Ok(stored
            .children
            .iter()
            .filter_map(|name| {
                let child = node.path().child(name);
                working.get(&child).map(|n| snapshot(&child, n))
            })
            .collect())
    }

    fn delete(&self, node: &Resource) -> StoreResult<()> {
        let path = node.path();
        let (Some(parent), Some(name)) = (path.parent_or_root(), path.file_name())
        else {
            return Err(StoreError::InvalidPath {
                path: path.to_path_buf(),
                reason: "the root node cannot be deleted".to_string(),
            });
        };

        let mut working = self.write_working()?;
        if !working.contains_key(path) {
            return Err(StoreError::NodeNotFound {
                path: path.to_path_buf(),
            });
        }

        let doomed: Vec<PathBuf> = working
            .keys()
            .filter(|p| p.starts_with(path))
            .cloned()
            .collect();
        for p in &doomed {
            working.remove(p);
        }
        if let Some(parent_node) = working.get_mut(&parent) {
            parent_node.children.retain(|child| child != name);
        }
        tracing::trace!(path = %path, removed = doomed.len(), "Deleted subtree");
        Ok(())
    }

    fn commit(&self) -> StoreResult<()> {
        let staged = self.read_working()?.clone();
        if let Some(file) = &self.write_back {
            persistence::write_tree(file, &staged)?;
            tracing::info!(file = %file.display(), nodes = staged.len(), "Wrote store to file");
        }
        *self.committed.write().map_err(|_| StoreError::LockPoisoned)? = staged;
        let count = self.commits.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(commit = count, "Committed store changes");
        Ok(())
    }
}
