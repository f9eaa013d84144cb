//! Configuration names for typed configurations.
//!
//! A configuration type declares its name through [`Configuration::NAME`].
//! Types without a usable declared name fall back to their fully qualified
//! Rust type name, so resolving a name never fails.
//!
//! ```
//! use caconf::metadata::{Configuration, SchemaRegistry, configuration_name};
//!
//! struct SiteConfig;
//! impl Configuration for SiteConfig {
//!     const NAME: Option<&'static str> = Some("site");
//! }
//!
//! struct Unnamed;
//! impl Configuration for Unnamed {}
//!
//! assert_eq!(configuration_name::<SiteConfig>(), "site");
//! assert!(configuration_name::<Unnamed>().ends_with("Unnamed"));
//!
//! let mut registry = SchemaRegistry::new();
//! registry.register::<SiteConfig>();
//! assert_eq!(
//!     registry.resolve_config_name(std::any::type_name::<SiteConfig>()),
//!     "site"
//! );
//! ```

use std::collections::BTreeMap;

/// A type that describes a configuration.
pub trait Configuration: 'static {
    /// Declared configuration name. `None` or a blank name selects the
    /// type name fallback.
    const NAME: Option<&'static str> = None;
}

/// Resolves the configuration name of `T`.
pub fn configuration_name<T: Configuration>() -> String {
    resolve_name(T::NAME, std::any::type_name::<T>())
}

fn resolve_name(declared: Option<&str>, type_name: &str) -> String {
    match declared.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => type_name.to_string(),
    }
}

/// Name information for one configuration type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationMetadata {
    type_name: String,
    name: String,
}

impl ConfigurationMetadata {
    /// Metadata for a type identified by `type_name` with an optional
    /// declared name.
    pub fn new(type_name: impl Into<String>, declared: Option<&str>) -> Self {
        let type_name = type_name.into();
        let name = resolve_name(declared, &type_name);
        Self { type_name, name }
    }

    /// Metadata for `T`.
    pub fn of<T: Configuration>() -> Self {
        Self::new(std::any::type_name::<T>(), T::NAME)
    }

    /// The type identifier.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The resolved configuration name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Known configuration types, keyed by type identifier.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    types: BTreeMap<String, ConfigurationMetadata>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T`, replacing any earlier registration of the same type.
    pub fn register<T: Configuration>(&mut self) -> &ConfigurationMetadata {
        self.insert(ConfigurationMetadata::of::<T>())
    }

    /// Registers every entry of `metadata`.
    pub fn register_all(&mut self, metadata: impl IntoIterator<Item = ConfigurationMetadata>) {
        for entry in metadata {
            self.insert(entry);
        }
    }

    fn insert(&mut self, metadata: ConfigurationMetadata) -> &ConfigurationMetadata {
        tracing::trace!(
            type_name = metadata.type_name(),
            name = metadata.name(),
            "Registered configuration type"
        );
        let key = metadata.type_name.clone();
        self.types.insert(key.clone(), metadata);
        &self.types[&key]
    }

    /// Looks up the registration for `type_name`.
    pub fn get(&self, type_name: &str) -> Option<&ConfigurationMetadata> {
        self.types.get(type_name)
    }

    /// Resolves the configuration name for a type identifier.
    ///
    /// Unregistered identifiers resolve to themselves.
    pub fn resolve_config_name(&self, type_name: &str) -> String {
        match self.get(type_name) {
            Some(metadata) => metadata.name().to_string(),
            None => type_name.to_string(),
        }
    }

    /// Resolves the configuration name of `T`, preferring its registration.
    pub fn name_for<T: Configuration>(&self) -> String {
        match self.get(std::any::type_name::<T>()) {
            Some(metadata) => metadata.name().to_string(),
            None => configuration_name::<T>(),
        }
    }

    /// Iterates registrations in type name order.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigurationMetadata> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
