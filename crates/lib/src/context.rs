//! Context-aware configuration entry point.
//!
//! [`ContextAwareConfig`] bundles a store, a naming strategy and a
//! [`SchemaRegistry`]. Every call builds a fresh
//! [`ConfigurationPersister`] for the given context node, so no state is
//! kept between calls apart from the store itself.

use std::sync::Arc;

use crate::{
    Result,
    metadata::{Configuration, SchemaRegistry},
    naming::{Identity, NamingStrategy},
    path::{Path, PathBuf},
    persist::ConfigurationPersister,
    store::ResourceStore,
    value::Record,
};

/// Reads and writes configurations stored relative to context nodes.
///
/// ```
/// use caconf::{ContextAwareConfig, path::PathBuf, record, store::InMemory};
///
/// let store = InMemory::new();
/// store
///     .create_resource(&PathBuf::from("content/site"), "page", &record! {})
///     .unwrap();
///
/// let config = ContextAwareConfig::new(store);
/// let context = PathBuf::from("content/site");
/// config
///     .write_configuration(&context, &PathBuf::from("cfg"), record! { "title" => "Home" })
///     .unwrap();
///
/// let stored = config.read_configuration(&context, &PathBuf::from("cfg")).unwrap();
/// assert_eq!(stored.unwrap().get_text("title"), Some("Home"));
/// ```
#[derive(Debug, Clone)]
pub struct ContextAwareConfig<S: ResourceStore> {
    store: S,
    strategy: Arc<dyn NamingStrategy>,
    registry: SchemaRegistry,
}

impl<S: ResourceStore> ContextAwareConfig<S> {
    /// Creates a façade over `store` using the [`Identity`] strategy.
    pub fn new(store: S) -> Self {
        Self {
            store,
            strategy: Arc::new(Identity),
            registry: SchemaRegistry::new(),
        }
    }

    /// Replaces the naming strategy.
    pub fn with_strategy(mut self, strategy: impl NamingStrategy + 'static) -> Self {
        self.strategy = Arc::new(strategy);
        self
    }

    /// Replaces the naming strategy with a shared one.
    pub fn with_shared_strategy(mut self, strategy: Arc<dyn NamingStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replaces the schema registry.
    pub fn with_registry(mut self, registry: SchemaRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn strategy(&self) -> &dyn NamingStrategy {
        self.strategy.as_ref()
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SchemaRegistry {
        &mut self.registry
    }

    /// Builds a persister for `context`.
    pub fn persister(&self, context: &Path) -> Result<ConfigurationPersister<'_>> {
        Ok(ConfigurationPersister::new(
            &self.store,
            self.strategy.as_ref(),
            context,
        )?)
    }

    /// Configuration name of `T` as a logical path.
    pub fn config_name_for<T: Configuration>(&self) -> PathBuf {
        PathBuf::normalize(&self.registry.name_for::<T>())
    }

    /// Writes `values` as the configuration `name` of `context`.
    pub fn write_configuration(&self, context: &Path, name: &Path, values: Record) -> Result<()> {
        self.persister(context)?.write_configuration(name, values)?;
        Ok(())
    }

    /// Writes `values` as the configuration of type `T`.
    pub fn write_configuration_for<T: Configuration>(
        &self,
        context: &Path,
        values: Record,
    ) -> Result<()> {
        self.write_configuration(context, &self.config_name_for::<T>(), values)
    }

    /// Replaces the configuration collection `name` of `context` with `items`.
    pub fn write_configuration_collection(
        &self,
        context: &Path,
        name: &Path,
        items: Vec<Record>,
    ) -> Result<()> {
        self.persister(context)?
            .write_configuration_collection(name, items)?;
        Ok(())
    }

    /// Replaces the configuration collection of type `T` with `items`.
    pub fn write_configuration_collection_for<T: Configuration>(
        &self,
        context: &Path,
        items: Vec<Record>,
    ) -> Result<()> {
        self.write_configuration_collection(context, &self.config_name_for::<T>(), items)
    }

    /// Replaces the collection `name` and its container-scoped properties.
    pub fn write_configuration_collection_with_properties(
        &self,
        context: &Path,
        name: &Path,
        items: Vec<Record>,
        properties: Record,
    ) -> Result<()> {
        self.persister(context)?
            .write_configuration_collection_with_properties(name, items, properties)?;
        Ok(())
    }

    /// Deletes the configuration `name` of `context`.
    pub fn delete_configuration(&self, context: &Path, name: &Path) -> Result<()> {
        self.persister(context)?.delete_configuration(name)?;
        Ok(())
    }

    /// Reads back the plain properties of the configuration `name`.
    pub fn read_configuration(&self, context: &Path, name: &Path) -> Result<Option<Record>> {
        Ok(self.persister(context)?.read_configuration(name)?)
    }

    /// Reads back the configuration of type `T`.
    pub fn read_configuration_for<T: Configuration>(
        &self,
        context: &Path,
    ) -> Result<Option<Record>> {
        self.read_configuration(context, &self.config_name_for::<T>())
    }

    /// Reads back the items of the collection `name` in stored order.
    pub fn read_configuration_collection(
        &self,
        context: &Path,
        name: &Path,
    ) -> Result<Vec<(String, Record)>> {
        Ok(self.persister(context)?.read_configuration_collection(name)?)
    }

    /// Reads back the container-scoped properties of the collection `name`.
    pub fn read_collection_properties(&self, context: &Path, name: &Path) -> Result<Option<Record>> {
        Ok(self.persister(context)?.read_collection_properties(name)?)
    }
}
