//! Constants used throughout the caconf library.
//!
//! Central definitions for reserved property namespaces, node names and
//! labels shared between the naming strategies, the store and the persister.

/// Namespace prefix of store-internal properties. Properties starting with
/// this prefix survive a full property replace.
pub const RESERVED_NAMESPACE: &str = "jcr:";

/// Resource type given to every node the persister creates.
pub const DEFAULT_RESOURCE_TYPE: &str = "nt:unstructured";

/// Fixed child segment used by [`crate::naming::ContentNode`].
pub const CONTENT_NODE: &str = "jcr:content";

/// Prefix of positional collection item labels (`item0`, `item1`, ...).
pub const ITEM_LABEL_PREFIX: &str = "item";

/// Auxiliary child holding container-scoped collection properties.
pub const COLLECTION_PROPERTIES_NODE: &str = "colPropsResource";

/// Context node property redirecting configuration storage to another path.
pub const CONFIG_REF_PROPERTY: &str = "sling:configRef";

/// Returns true if `property` belongs to the reserved namespace.
pub fn is_reserved_property(property: &str) -> bool {
    property.starts_with(RESERVED_NAMESPACE)
}

/// Positional label of the collection item at `index`.
pub fn item_label(index: usize) -> String {
    format!("{ITEM_LABEL_PREFIX}{index}")
}
