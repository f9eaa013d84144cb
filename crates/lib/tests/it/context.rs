//! The ContextAwareConfig façade and typed configurations.

use std::sync::Arc;

use caconf::{
    ContextAwareConfig,
    metadata::{Configuration, ConfigurationMetadata, SchemaRegistry},
    naming::{ContentNode, NamingStrategy},
    record,
    store::{InMemory, ResourceStore},
};

use crate::helpers::*;

struct SiteConfig;
impl Configuration for SiteConfig {
    const NAME: Option<&'static str> = Some("site");
}

struct MenuItems;
impl Configuration for MenuItems {
    const NAME: Option<&'static str> = Some("navigation/menu");
}

struct Anonymous;
impl Configuration for Anonymous {}

#[test]
fn test_write_and_read_through_facade() {
    let config = ContextAwareConfig::new(store_with_context());

    config
        .write_configuration(&p(CONTEXT), &p("cfg"), record! { "a" => 1 })
        .unwrap();

    let read = config.read_configuration(&p(CONTEXT), &p("cfg")).unwrap();
    assert_eq!(read, Some(record! { "a" => 1 }));
    assert_eq!(properties_at(config.store(), "cfg").get_int("a"), Some(1));
}

#[test]
fn test_each_call_commits_once() {
    let config = ContextAwareConfig::new(store_with_context());
    let base = config.store().commit_count();

    config
        .write_configuration(&p(CONTEXT), &p("one"), record! { "a" => 1 })
        .unwrap();
    config
        .write_configuration_collection(&p(CONTEXT), &p("two"), string_items(&["x", "y"], "v"))
        .unwrap();
    config.delete_configuration(&p(CONTEXT), &p("one")).unwrap();

    assert_eq!(config.store().commit_count(), base + 3);
}

#[test]
fn test_typed_writes_use_declared_names() {
    let config = ContextAwareConfig::new(store_with_context());

    config
        .write_configuration_for::<SiteConfig>(&p(CONTEXT), record! { "title" => "Home" })
        .unwrap();
    config
        .write_configuration_collection_for::<MenuItems>(
            &p(CONTEXT),
            string_items(&["home", "about"], "label"),
        )
        .unwrap();

    assert_eq!(properties_at(config.store(), "site").get_text("title"), Some("Home"));
    assert_eq!(
        child_names(config.store(), "navigation/menu"),
        vec!["item0", "item1"]
    );
    assert_eq!(
        config
            .read_configuration_for::<SiteConfig>(&p(CONTEXT))
            .unwrap()
            .unwrap()
            .get_text("title"),
        Some("Home")
    );
}

#[test]
fn test_unnamed_type_falls_back_to_type_name() {
    let config = ContextAwareConfig::new(store_with_context());
    let name = config.config_name_for::<Anonymous>();
    assert_eq!(name.as_str(), std::any::type_name::<Anonymous>());

    config
        .write_configuration_for::<Anonymous>(&p(CONTEXT), record! { "a" => 1 })
        .unwrap();
    assert!(exists(config.store(), name.as_str()));
}

#[test]
fn test_registry_overrides_name() {
    let mut registry = SchemaRegistry::new();
    registry.register_all([ConfigurationMetadata::new(
        std::any::type_name::<Anonymous>(),
        Some("renamed"),
    )]);
    let config = ContextAwareConfig::new(store_with_context()).with_registry(registry);

    config
        .write_configuration_for::<Anonymous>(&p(CONTEXT), record! { "a" => 1 })
        .unwrap();
    assert_eq!(properties_at(config.store(), "renamed").get_int("a"), Some(1));
}

#[test]
fn test_strategy_injection() {
    let strategy: Arc<dyn NamingStrategy> = Arc::new(ContentNode::default());
    let config = ContextAwareConfig::new(store_with_context()).with_shared_strategy(strategy);

    config
        .write_configuration(&p(CONTEXT), &p("cfg"), record! { "a" => 1 })
        .unwrap();
    assert_eq!(
        properties_at(config.store(), "cfg/jcr:content").get_int("a"),
        Some(1)
    );
}

#[test]
fn test_shared_store_handle() {
    let store = Arc::new(store_with_context());
    let config = ContextAwareConfig::new(Arc::clone(&store));

    config
        .write_configuration(&p(CONTEXT), &p("cfg"), record! { "a" => 1 })
        .unwrap();
    assert!(store.resolve(&p("content/site/cfg")).unwrap().is_some());
}

#[test]
fn test_missing_context_fails_before_writing() {
    let config = ContextAwareConfig::new(InMemory::new());
    let err = config
        .write_configuration(&p("content/nowhere"), &p("cfg"), record! { "a" => 1 })
        .unwrap_err();

    assert!(err.is_invalid_target());
    assert_eq!(config.store().commit_count(), 0);
    assert!(config.store().resolve(&p("content/nowhere/cfg")).unwrap().is_none());
}
