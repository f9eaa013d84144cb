//! Decomposition of configuration records.
//!
//! A record handed to the persister may mix plain properties, nested
//! configurations and nested configuration collections. [`decompose`] splits
//! it once into three disjoint partitions so that nothing downstream has to
//! inspect value shapes again.

use std::collections::BTreeMap;

use crate::value::{Record, Value};

/// A record entry after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// Stored as-is as a property. Includes flat lists of non-record values.
    Scalar(Value),
    /// A single nested configuration.
    NestedRecord(Record),
    /// An ordered collection of nested configurations.
    NestedCollection(Vec<Record>),
}

impl ConfigValue {
    /// Classifies a raw value.
    ///
    /// Records become [`ConfigValue::NestedRecord`] and lists made entirely
    /// of records become [`ConfigValue::NestedCollection`]. An empty list is
    /// an empty collection, so writing it clears the stored items. Mixed
    /// lists and everything else are scalars.
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Record(record) => ConfigValue::NestedRecord(record),
            Value::List(items) if items.iter().all(Value::is_record) => {
                ConfigValue::NestedCollection(
                    items
                        .into_iter()
                        .filter_map(|item| match item {
                            Value::Record(record) => Some(record),
                            _ => None,
                        })
                        .collect(),
                )
            }
            other => ConfigValue::Scalar(other),
        }
    }
}

/// The three partitions of one decomposed record, each keyed by the original
/// entry key and iterated in key order.
///
/// The partitions are pairwise disjoint and together hold every key of the
/// input record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationDataParts {
    /// Plain properties written at the configuration's own node.
    pub values: Record,
    /// Nested configurations, one sub-path per key.
    pub nested_records: BTreeMap<String, Record>,
    /// Nested configuration collections, one sub-path per key. Item order
    /// within each collection is preserved as given.
    pub nested_collections: BTreeMap<String, Vec<Record>>,
}

impl ConfigurationDataParts {
    /// Total number of keys across all partitions.
    pub fn len(&self) -> usize {
        self.values.len() + self.nested_records.len() + self.nested_collections.len()
    }

    /// Returns true if the decomposed record was empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if there is nothing to recurse into.
    pub fn is_flat(&self) -> bool {
        self.nested_records.is_empty() && self.nested_collections.is_empty()
    }
}

/// Splits a record into scalar, nested-record and nested-collection partitions.
pub fn decompose(input: Record) -> ConfigurationDataParts {
    let mut parts = ConfigurationDataParts::default();
    for (key, value) in input {
        match ConfigValue::classify(value) {
            ConfigValue::Scalar(value) => {
                parts.values.insert(key, value);
            }
            ConfigValue::NestedRecord(record) => {
                parts.nested_records.insert(key, record);
            }
            ConfigValue::NestedCollection(items) => {
                parts.nested_collections.insert(key, items);
            }
        }
    }
    parts
}
