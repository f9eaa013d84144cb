//! ResourceStore behavior the persister relies on.

use caconf::{
    Value,
    record,
    store::{InMemory, ResourceStore, StoreError},
};

use crate::helpers::p;

#[test]
fn test_get_or_create_is_idempotent() {
    let store = InMemory::new();
    let first = store.get_or_create(&p("a/b"), "type1").unwrap();
    let second = store.get_or_create(&p("a/b"), "type2").unwrap();

    assert_eq!(first.path(), second.path());
    assert_eq!(second.resource_type(), "type1");
    let parent = store.resolve(&p("a")).unwrap().unwrap();
    assert_eq!(store.children(&parent).unwrap().len(), 1);
}

#[test]
fn test_replace_properties_is_full_replace() {
    let store = InMemory::new();
    let node = store
        .create_resource(&p("n"), "t", &record! { "a" => 1, "b" => 2, "jcr:x" => "r" })
        .unwrap();

    store.replace_properties(&node, &record! { "c" => 3 }).unwrap();

    let node = store.resolve(&p("n")).unwrap().unwrap();
    assert_eq!(node.property("a"), None);
    assert_eq!(node.property("c"), Some(&Value::from(3)));
    assert_eq!(node.property("jcr:x"), Some(&Value::from("r")));
}

#[test]
fn test_delete_then_recreate() {
    let store = InMemory::new();
    store.create_resource(&p("p/x"), "t", &record! { "v" => 1 }).unwrap();
    store.create_resource(&p("p/y"), "t", &record! {}).unwrap();

    let x = store.resolve(&p("p/x")).unwrap().unwrap();
    store.delete(&x).unwrap();
    store.create_resource(&p("p/x"), "t", &record! {}).unwrap();

    let parent = store.resolve(&p("p")).unwrap().unwrap();
    let names: Vec<String> = store
        .children(&parent)
        .unwrap()
        .iter()
        .filter_map(|c| c.name().map(str::to_string))
        .collect();
    assert_eq!(names, vec!["y", "x"]);
    assert!(store.resolve(&p("p/x")).unwrap().unwrap().properties().is_empty());
}

#[test]
fn test_deleted_node_cannot_be_modified() {
    let store = InMemory::new();
    let node = store.create_resource(&p("gone"), "t", &record! {}).unwrap();
    store.delete(&node).unwrap();

    let err = store.replace_properties(&node, &record! { "a" => 1 }).unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, StoreError::NodeNotFound { .. }));
}

#[test]
fn test_revert_discards_staged_changes() {
    let store = InMemory::new();
    store.create_resource(&p("kept"), "t", &record! {}).unwrap();
    store.commit().unwrap();
    store.create_resource(&p("staged"), "t", &record! {}).unwrap();

    store.revert().unwrap();

    assert!(store.resolve(&p("kept")).unwrap().is_some());
    assert!(store.resolve(&p("staged")).unwrap().is_none());
}
