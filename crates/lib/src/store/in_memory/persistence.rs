//! Persistence operations for the InMemory store
//!
//! This module handles serialization and file I/O for saving/loading the
//! committed tree to/from JSON files.

use std::path::Path as FsPath;

use serde::{Deserialize, Deserializer, Serialize};

use super::{Tree, empty_tree};
use crate::{path::PathBuf, store::StoreError, store::StoreResult};

/// The current persistence file format version.
/// v0 indicates this is an unstable format subject to breaking changes.
const PERSISTENCE_VERSION: u8 = 0;

/// Helper to check if version is default (0) for serde skip_serializing_if
fn is_v0(v: &u8) -> bool {
    *v == 0
}

/// Validates the persistence version during deserialization.
fn validate_persistence_version<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u8::deserialize(deserializer)?;
    if version != PERSISTENCE_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported persistence version {version}; only version {PERSISTENCE_VERSION} is supported"
        )));
    }
    Ok(version)
}

/// On-disk layout of a store file
#[derive(Serialize, Deserialize)]
struct SerializableStore {
    /// File format version for compatibility checking
    #[serde(
        rename = "_v",
        default,
        skip_serializing_if = "is_v0",
        deserialize_with = "validate_persistence_version"
    )]
    version: u8,
    nodes: Tree,
}

/// Writes `tree` to `file` as pretty-printed JSON.
pub(super) fn write_tree(file: &FsPath, tree: &Tree) -> StoreResult<()> {
    let serializable = SerializableStore {
        version: PERSISTENCE_VERSION,
        nodes: tree.clone(),
    };
    let json = serde_json::to_string_pretty(&serializable)
        .map_err(|e| StoreError::SerializationFailed { source: e })?;
    std::fs::write(file, json).map_err(|e| StoreError::FileIo { source: e })
}

/// Reads a tree from `file`.
///
/// Returns `Ok(None)` if the file does not exist. A file without a root
/// node gets one added.
pub(super) fn read_tree(file: &FsPath) -> StoreResult<Option<Tree>> {
    let json = match std::fs::read_to_string(file) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::FileIo { source: e }),
    };

    let serializable: SerializableStore = serde_json::from_str(&json)
        .map_err(|e| StoreError::DeserializationFailed { source: e })?;

    let mut nodes = serializable.nodes;
    if !nodes.contains_key(&PathBuf::new()) {
        nodes.extend(empty_tree());
    }
    Ok(Some(nodes))
}
