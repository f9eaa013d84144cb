//! Store and strategy creation.

use std::path::Path;

use caconf::{
    ContextAwareConfig,
    naming::{ContentNode, Identity},
    store::InMemory,
};

use crate::cli::{Cli, Strategy};

/// Open the JSON-backed store named on the command line.
///
/// A missing file yields an empty store; it is created on the first commit.
pub fn open_store(file: &Path) -> Result<InMemory, Box<dyn std::error::Error>> {
    let store = InMemory::load_from_file(file)?.with_write_back(file);
    tracing::debug!(file = %file.display(), "Opened store");
    Ok(store)
}

/// Build the configuration façade for the parsed command line
pub fn create_config(cli: &Cli) -> Result<ContextAwareConfig<InMemory>, Box<dyn std::error::Error>> {
    let store = open_store(&cli.store)?;
    let config = ContextAwareConfig::new(store);
    Ok(match cli.strategy {
        Strategy::Identity => config.with_strategy(Identity),
        Strategy::ContentNode => config.with_strategy(ContentNode::default()),
        Strategy::ContentNodeParents => {
            config.with_strategy(ContentNode::default().with_parent_redirect())
        }
    })
}
