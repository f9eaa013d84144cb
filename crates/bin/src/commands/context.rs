//! Context node management.

use caconf::{
    constants::{CONFIG_REF_PROPERTY, DEFAULT_RESOURCE_TYPE},
    path::PathBuf,
    record,
    store::{InMemory, ResourceStore},
};

use crate::cli::CreateContextArgs;

/// Run the `create-context` command
pub fn create(store: &InMemory, args: &CreateContextArgs) -> Result<(), Box<dyn std::error::Error>> {
    let path = PathBuf::normalize(&args.path);
    let properties = match &args.config_ref {
        Some(reference) => record! { CONFIG_REF_PROPERTY => reference.as_str() },
        None => record! {},
    };

    store.create_resource(&path, DEFAULT_RESOURCE_TYPE, &properties)?;
    store.commit()?;
    tracing::info!(path = %path, config_ref = ?args.config_ref, "Context created");
    Ok(())
}
