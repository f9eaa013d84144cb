//! Physical layouts produced by the bundled and custom naming strategies.

use caconf::{
    naming::{ContentNode, Identity, NameKind, NamingStrategy},
    path::{Path, PathBuf},
    record,
};

use crate::helpers::*;

#[test]
fn test_identity_physical_equals_logical() {
    let store = store_with_context();
    let persister = persister(&store, &Identity);

    for name in ["cfg", "a/b/c", "list/item3"] {
        for kind in [
            NameKind::Resource,
            NameKind::CollectionParent,
            NameKind::CollectionItem,
        ] {
            assert_eq!(
                persister.physical_path(kind, &p(name)),
                p(CONTEXT).join(p(name))
            );
        }
    }
}

#[test]
fn test_content_node_configuration_layout() {
    let store = store_with_context();
    let strategy = ContentNode::default();
    let persister = persister(&store, &strategy);

    persister
        .write_configuration(
            &p("cfg"),
            record! {
                "stringParam" => "v1",
                "sub" => string_items(&["v1", "v2"], "subStringParam"),
                "sub2" => record! { "x" => 1 },
            },
        )
        .unwrap();

    assert_eq!(
        properties_at(&store, "cfg/jcr:content").get_text("stringParam"),
        Some("v1")
    );
    assert!(properties_at(&store, "cfg").is_empty());

    // Nested names are built from the logical parent name
    assert_eq!(
        properties_at(&store, "cfg/sub/item0/jcr:content").get_text("subStringParam"),
        Some("v1")
    );
    assert_eq!(
        properties_at(&store, "cfg/sub/item1/jcr:content").get_text("subStringParam"),
        Some("v2")
    );
    assert_eq!(
        properties_at(&store, "cfg/sub2/jcr:content").get_int("x"),
        Some(1)
    );
}

#[test]
fn test_content_node_collection_rewrite() {
    let store = store_with_context();
    let strategy = ContentNode::default();
    let persister = persister(&store, &strategy);

    persister
        .write_configuration_collection(&p("cfg"), string_items(&["a", "b", "c"], "v"))
        .unwrap();
    persister
        .write_configuration_collection(&p("cfg"), string_items(&["d"], "v"))
        .unwrap();

    assert_eq!(child_names(&store, "cfg"), vec!["item0"]);
    assert_eq!(child_names(&store, "cfg/item0"), vec!["jcr:content"]);
    assert_eq!(
        properties_at(&store, "cfg/item0/jcr:content").get_text("v"),
        Some("d")
    );
}

#[test]
fn test_content_node_is_idempotent_for_written_paths() {
    let strategy = ContentNode::default();
    for name in ["cfg", "cfg/sub/item0", "jcr:content", "a/jcr:content/b"] {
        let once = strategy.physical_name(NameKind::Resource, &p(name));
        let twice = strategy.physical_name(NameKind::Resource, &once);
        assert_eq!(once, twice);
        assert!(once.contains_component("jcr:content"));
    }
}

#[test]
fn test_custom_child_segment() {
    let store = store_with_context();
    let strategy = ContentNode::new("data");
    let persister = persister(&store, &strategy);

    persister
        .write_configuration(&p("cfg"), record! { "a" => 1 })
        .unwrap();
    assert_eq!(properties_at(&store, "cfg/data").get_int("a"), Some(1));
}

/// Moves every configuration below a shared bucket, leaving items alone.
#[derive(Debug)]
struct Bucketed;

impl NamingStrategy for Bucketed {
    fn resource_name(&self, logical: &Path) -> Option<PathBuf> {
        Some(p("bucket").join(logical))
    }

    fn collection_parent_name(&self, logical: &Path) -> Option<PathBuf> {
        Some(p("bucket").join(logical))
    }

    fn collection_item_name(&self, _logical: &Path) -> Option<PathBuf> {
        None
    }
}

#[test]
fn test_custom_strategy_is_consulted_per_kind() {
    let store = store_with_context();
    let persister = persister(&store, &Bucketed);

    persister
        .write_configuration(&p("cfg"), record! { "a" => 1 })
        .unwrap();
    persister
        .write_configuration_collection(&p("list"), string_items(&["x", "y"], "v"))
        .unwrap();

    assert_eq!(properties_at(&store, "bucket/cfg").get_int("a"), Some(1));
    assert!(!exists(&store, "cfg"));
    assert_eq!(child_names(&store, "bucket/list"), vec!["item0", "item1"]);
    assert_eq!(
        properties_at(&store, "bucket/list/item1").get_text("v"),
        Some("y")
    );
}

/// Returns empty names for every configuration.
#[derive(Debug)]
struct Blank;

impl NamingStrategy for Blank {
    fn resource_name(&self, _logical: &Path) -> Option<PathBuf> {
        Some(PathBuf::new())
    }

    fn collection_parent_name(&self, _logical: &Path) -> Option<PathBuf> {
        Some(PathBuf::new())
    }

    fn collection_item_name(&self, _logical: &Path) -> Option<PathBuf> {
        Some(PathBuf::new())
    }
}

#[test]
fn test_empty_names_fall_back_to_logical() {
    let store = store_with_context();
    let persister = persister(&store, &Blank);

    persister
        .write_configuration(&p("cfg"), record! { "a" => 1, "list" => string_items(&["x"], "v") })
        .unwrap();

    assert_eq!(properties_at(&store, "cfg").get_int("a"), Some(1));
    assert_eq!(properties_at(&store, "cfg/list/item0").get_text("v"), Some("x"));
    assert_eq!(properties_at(&store, "").get_int("a"), None);
}
