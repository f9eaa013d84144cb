//! Naming strategies mapping logical configuration names to physical paths.
//!
//! A [`NamingStrategy`] decides, independently for three kinds of path, where
//! a configuration is physically stored:
//!
//! - a plain configuration ([`NamingStrategy::resource_name`])
//! - the container of a configuration collection
//!   ([`NamingStrategy::collection_parent_name`])
//! - one item of a collection ([`NamingStrategy::collection_item_name`])
//!
//! Each operation returns `None` for "no remap, use the logical name".
//! Returning `Some` of the input is an explicit identity and behaves the same.

use std::fmt::Debug;

use crate::{
    constants::{COLLECTION_PROPERTIES_NODE, CONTENT_NODE},
    path::{Path, PathBuf},
};

/// The three path kinds a strategy is consulted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    /// A plain (non-collection) configuration
    Resource,
    /// The container holding collection items
    CollectionParent,
    /// A single collection item
    CollectionItem,
}

impl NameKind {
    /// Short name used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            NameKind::Resource => "resource",
            NameKind::CollectionParent => "collection_parent",
            NameKind::CollectionItem => "collection_item",
        }
    }
}

/// Pluggable mapping from logical configuration names to physical paths.
///
/// All operations are pure. Implementations must be `Send` and `Sync` so a
/// strategy can be shared between persisters.
pub trait NamingStrategy: Send + Sync + Debug {
    /// Physical name for a plain configuration.
    fn resource_name(&self, logical: &Path) -> Option<PathBuf>;

    /// Physical name of the container that holds collection items.
    fn collection_parent_name(&self, logical: &Path) -> Option<PathBuf>;

    /// Physical name of one collection item, given the item path
    /// (collection parent plus positional label).
    fn collection_item_name(&self, logical: &Path) -> Option<PathBuf>;

    /// Auxiliary path for container-scoped collection properties.
    ///
    /// Must not collide with any item label below `parent`.
    fn collection_properties_name(&self, parent: &Path) -> PathBuf {
        parent.child(COLLECTION_PROPERTIES_NODE)
    }

    /// Applies the operation for `kind` and resolves "no remap" to the
    /// logical name.
    ///
    /// An empty remap is treated as "no remap" as well, matching the legacy
    /// behavior where an empty name meant unset.
    fn physical_name(&self, kind: NameKind, logical: &Path) -> PathBuf {
        let remapped = match kind {
            NameKind::Resource => self.resource_name(logical),
            NameKind::CollectionParent => self.collection_parent_name(logical),
            NameKind::CollectionItem => self.collection_item_name(logical),
        };
        match remapped {
            Some(physical) if physical.is_empty() && !logical.is_empty() => {
                tracing::warn!(
                    kind = kind.as_str(),
                    logical = %logical,
                    "Naming strategy returned an empty name, keeping logical name"
                );
                logical.to_path_buf()
            }
            Some(physical) => {
                if physical.as_str() != logical.as_str() {
                    tracing::trace!(
                        kind = kind.as_str(),
                        logical = %logical,
                        physical = %physical,
                        "Remapped configuration name"
                    );
                }
                physical
            }
            None => logical.to_path_buf(),
        }
    }
}

/// Default strategy: physical paths equal logical paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl NamingStrategy for Identity {
    fn resource_name(&self, logical: &Path) -> Option<PathBuf> {
        Some(logical.to_path_buf())
    }

    fn collection_parent_name(&self, logical: &Path) -> Option<PathBuf> {
        Some(logical.to_path_buf())
    }

    fn collection_item_name(&self, logical: &Path) -> Option<PathBuf> {
        Some(logical.to_path_buf())
    }
}

/// Stores configuration data one level down, in a fixed child node.
///
/// Plain configurations and collection items get the child segment appended
/// unless the path already contains it anywhere, which makes the mapping
/// idempotent. Collection parents are left alone unless
/// [`ContentNode::with_parent_redirect`] is used.
///
/// ```
/// # use caconf::naming::{ContentNode, NamingStrategy, NameKind};
/// # use caconf::path::PathBuf;
/// let strategy = ContentNode::default();
/// let once = strategy.physical_name(NameKind::Resource, &PathBuf::from("cfg"));
/// assert_eq!(once.as_str(), "cfg/jcr:content");
///
/// let twice = strategy.physical_name(NameKind::Resource, &once);
/// assert_eq!(twice, once);
/// ```
#[derive(Debug, Clone)]
pub struct ContentNode {
    child: String,
    redirect_parents: bool,
}

impl ContentNode {
    /// Creates a strategy redirecting into `child`.
    pub fn new(child: impl Into<String>) -> Self {
        Self {
            child: child.into(),
            redirect_parents: false,
        }
    }

    /// Also redirect collection parents into the child node.
    pub fn with_parent_redirect(mut self) -> Self {
        self.redirect_parents = true;
        self
    }

    /// The child segment this strategy redirects into.
    pub fn child(&self) -> &str {
        &self.child
    }

    fn redirect(&self, logical: &Path) -> PathBuf {
        if logical.contains_component(&self.child) {
            logical.to_path_buf()
        } else {
            logical.child(&self.child)
        }
    }
}

impl Default for ContentNode {
    fn default() -> Self {
        Self::new(CONTENT_NODE)
    }
}

impl NamingStrategy for ContentNode {
    fn resource_name(&self, logical: &Path) -> Option<PathBuf> {
        Some(self.redirect(logical))
    }

    fn collection_parent_name(&self, logical: &Path) -> Option<PathBuf> {
        if self.redirect_parents {
            Some(self.redirect(logical))
        } else {
            None
        }
    }

    fn collection_item_name(&self, logical: &Path) -> Option<PathBuf> {
        self.resource_name(logical)
    }
}
