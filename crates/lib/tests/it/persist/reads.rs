//! Reading back and deleting persisted configurations.

use caconf::{
    naming::{ContentNode, Identity},
    record,
};

use crate::helpers::*;

#[test]
fn test_read_configuration_skips_reserved_properties() {
    let store = store_with_context();
    let persister = persister(&store, &Identity);

    persister
        .write_configuration(&p("cfg"), record! { "a" => 1, "jcr:title" => "t" })
        .unwrap();

    let read = persister.read_configuration(&p("cfg")).unwrap().unwrap();
    assert_eq!(read, record! { "a" => 1 });
    assert!(persister.read_configuration(&p("missing")).unwrap().is_none());
}

#[test]
fn test_read_collection_in_stored_order() {
    let store = store_with_context();
    let strategy = ContentNode::default();
    let persister = persister(&store, &strategy);

    persister
        .write_configuration_collection_with_properties(
            &p("list"),
            string_items(&["first", "second", "third"], "v"),
            record! { "inherit" => true },
        )
        .unwrap();

    let items = persister.read_configuration_collection(&p("list")).unwrap();
    let labels: Vec<&str> = items.iter().map(|(label, _)| label.as_str()).collect();
    assert_eq!(labels, vec!["item0", "item1", "item2"]);
    let values: Vec<&str> = items
        .iter()
        .filter_map(|(_, record)| record.get_text("v"))
        .collect();
    assert_eq!(values, vec!["first", "second", "third"]);

    let props = persister.read_collection_properties(&p("list")).unwrap();
    assert_eq!(props, Some(record! { "inherit" => true }));
}

#[test]
fn test_read_missing_collection_is_empty() {
    let store = store_with_context();
    let persister = persister(&store, &Identity);
    assert!(persister.read_configuration_collection(&p("nothing")).unwrap().is_empty());
    assert!(persister.read_collection_properties(&p("nothing")).unwrap().is_none());
}

#[test]
fn test_delete_configuration_removes_subtree() {
    let store = store_with_context();
    let persister = persister(&store, &Identity);

    persister
        .write_configuration(
            &p("cfg"),
            record! { "a" => 1, "sub" => string_items(&["x"], "v") },
        )
        .unwrap();
    let commits = store.commit_count();

    persister.delete_configuration(&p("cfg")).unwrap();

    assert!(!exists(&store, "cfg"));
    assert!(!exists(&store, "cfg/sub/item0"));
    assert_eq!(store.commit_count(), commits + 1);
}

#[test]
fn test_delete_missing_configuration_is_ok() {
    let store = store_with_context();
    let persister = persister(&store, &Identity);
    persister.delete_configuration(&p("never-written")).unwrap();
}

#[test]
fn test_delete_keeps_siblings() {
    let store = store_with_context();
    let persister = persister(&store, &Identity);

    persister
        .write_configuration(&p("one"), record! { "a" => 1 })
        .unwrap();
    persister
        .write_configuration(&p("two"), record! { "b" => 2 })
        .unwrap();
    persister.delete_configuration(&p("one")).unwrap();

    assert!(!exists(&store, "one"));
    assert_eq!(properties_at(&store, "two").get_int("b"), Some(2));
}
