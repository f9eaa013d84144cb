//! Layouts produced by plain and nested writes with the identity strategy.

use caconf::{
    Value,
    naming::Identity,
    record,
    store::{InMemory, ResourceStore},
};

use crate::helpers::*;

#[test]
fn test_flat_configuration() {
    let store = store_with_context();
    let persister = persister(&store, &Identity);

    persister
        .write_configuration(&p("cfg"), record! { "stringParam" => "v1", "intParam" => 5 })
        .unwrap();

    let props = properties_at(&store, "cfg");
    assert_eq!(props.get_text("stringParam"), Some("v1"));
    assert_eq!(props.get_int("intParam"), Some(5));
    assert!(child_names(&store, "cfg").is_empty());
}

#[test]
fn test_collection_items_in_order() {
    let store = store_with_context();
    let persister = persister(&store, &Identity);

    persister
        .write_configuration_collection(&p("cfg"), string_items(&["v1", "v2"], "stringParam"))
        .unwrap();

    assert_eq!(child_names(&store, "cfg"), vec!["item0", "item1"]);
    assert_eq!(properties_at(&store, "cfg/item0").get_text("stringParam"), Some("v1"));
    assert_eq!(properties_at(&store, "cfg/item1").get_text("stringParam"), Some("v2"));
}

#[test]
fn test_nested_collection_inside_configuration() {
    let store = store_with_context();
    let persister = persister(&store, &Identity);

    persister
        .write_configuration(
            &p("cfg"),
            record! {
                "stringParam" => "v1",
                "sub" => string_items(&["v1", "v2"], "subStringParam"),
            },
        )
        .unwrap();

    let root = properties_at(&store, "cfg");
    assert_eq!(root.get_text("stringParam"), Some("v1"));
    assert!(!root.contains_key("sub"));
    assert_eq!(
        properties_at(&store, "cfg/sub/item0").get_text("subStringParam"),
        Some("v1")
    );
    assert_eq!(
        properties_at(&store, "cfg/sub/item1").get_text("subStringParam"),
        Some("v2")
    );
}

#[test]
fn test_deeply_nested_configuration() {
    let store = store_with_context();
    let persister = persister(&store, &Identity);

    persister
        .write_configuration(
            &p("nested"),
            record! {
                "stringParam" => "value1",
                "stringArrayParam" => vec!["v1a", "v1b"],
                "sub" => vec![
                    record! {
                        "subStringParam" => "v1",
                        "subList" => vec![
                            record! { "stringParam" => "deep1" },
                            record! { "stringParam" => "deep2" },
                        ],
                    },
                    record! { "subStringParam" => "v2" },
                ],
                "sub2" => record! {
                    "sub2StringParam" => "v3",
                    "sub2Nested" => record! { "intParam" => 7 },
                },
            },
        )
        .unwrap();

    let root = properties_at(&store, "nested");
    assert_eq!(
        root.get("stringArrayParam"),
        Some(&Value::from(vec!["v1a", "v1b"]))
    );
    assert_eq!(
        properties_at(&store, "nested/sub/item0").get_text("subStringParam"),
        Some("v1")
    );
    assert!(!properties_at(&store, "nested/sub/item0").contains_key("subList"));
    assert_eq!(
        properties_at(&store, "nested/sub/item0/subList/item1").get_text("stringParam"),
        Some("deep2")
    );
    assert_eq!(
        properties_at(&store, "nested/sub2").get_text("sub2StringParam"),
        Some("v3")
    );
    assert_eq!(
        properties_at(&store, "nested/sub2/sub2Nested").get_int("intParam"),
        Some(7)
    );
}

#[test]
fn test_item_order_ignores_item_key_order() {
    let store = store_with_context();
    let persister = persister(&store, &Identity);

    persister
        .write_configuration_collection(
            &p("list"),
            vec![
                record! { "z" => "A" },
                record! { "a" => "B" },
                record! { "m" => "C" },
            ],
        )
        .unwrap();

    assert_eq!(child_names(&store, "list"), vec!["item0", "item1", "item2"]);
    assert_eq!(properties_at(&store, "list/item0").get_text("z"), Some("A"));
    assert_eq!(properties_at(&store, "list/item1").get_text("a"), Some("B"));
    assert_eq!(properties_at(&store, "list/item2").get_text("m"), Some("C"));
}

#[test]
fn test_rewrite_replaces_properties() {
    let store = store_with_context();
    let persister = persister(&store, &Identity);

    persister
        .write_configuration(&p("cfg"), record! { "a" => 1, "b" => 2 })
        .unwrap();
    persister
        .write_configuration(&p("cfg"), record! { "b" => 3 })
        .unwrap();

    let props = properties_at(&store, "cfg");
    assert!(!props.contains_key("a"));
    assert_eq!(props.get_int("b"), Some(3));
}

#[test]
fn test_reserved_properties_survive_rewrite() {
    let store = store_with_context();
    store
        .create_resource(
            &p("content/site/cfg"),
            "nt:unstructured",
            &record! { "jcr:title" => "kept", "old" => true },
        )
        .unwrap();

    let persister = persister(&store, &Identity);
    persister
        .write_configuration(&p("cfg"), record! { "new" => 1 })
        .unwrap();

    let props = properties_at(&store, "cfg");
    assert_eq!(props.get_text("jcr:title"), Some("kept"));
    assert!(!props.contains_key("old"));
    assert_eq!(props.get_int("new"), Some(1));
}

#[test]
fn test_one_commit_per_top_level_write() {
    let store = store_with_context();
    let base = store.commit_count();
    let persister = persister(&store, &Identity);

    persister
        .write_configuration(
            &p("cfg"),
            record! {
                "sub" => string_items(&["a", "b", "c"], "v"),
                "sub2" => record! { "x" => 1 },
            },
        )
        .unwrap();
    assert_eq!(store.commit_count(), base + 1);

    persister
        .write_configuration_collection(&p("list"), string_items(&["a"], "v"))
        .unwrap();
    assert_eq!(store.commit_count(), base + 2);
}

#[test]
fn test_configuration_root_from_reference() {
    let store = InMemory::new();
    store
        .create_resource(&p(CONTEXT), "page", &record! { "sling:configRef" => "/conf/site" })
        .unwrap();

    let persister = persister(&store, &Identity);
    assert_eq!(persister.config_root().as_str(), "conf/site");

    persister
        .write_configuration(&p("cfg"), record! { "a" => 1 })
        .unwrap();

    assert!(store.resolve(&p("conf/site/cfg")).unwrap().is_some());
    assert!(!exists(&store, "cfg"));
}
