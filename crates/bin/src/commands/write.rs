//! Configuration write and delete commands.

use std::{io::Read, path::Path};

use caconf::{ContextAwareConfig, Record, Value, path::PathBuf, store::InMemory};

use crate::cli::{TargetArgs, WriteArgs};

/// Read JSON from `input`, or from stdin if `input` is `-`.
fn read_input(input: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let json = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };
    let parsed: serde_json::Value = serde_json::from_str(&json)?;
    Ok(Value::from(parsed))
}

fn into_record(value: Value, what: &str) -> Result<Record, Box<dyn std::error::Error>> {
    match value {
        Value::Record(record) => Ok(record),
        other => Err(format!("{what} must be a JSON object, got {}", other.type_name()).into()),
    }
}

/// Run the `write` command
pub fn write(
    config: &ContextAwareConfig<InMemory>,
    args: &WriteArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = into_record(read_input(&args.input)?, "input")?;
    let (context, name) = paths(&args.target);

    config.write_configuration(&context, &name, record)?;
    tracing::info!(context = %context, name = %name, "Configuration written");
    Ok(())
}

/// Run the `write-collection` command
pub fn write_collection(
    config: &ContextAwareConfig<InMemory>,
    args: &WriteArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let items = match read_input(&args.input)? {
        Value::List(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| into_record(item, &format!("item {index}")))
            .collect::<Result<Vec<_>, _>>()?,
        other => {
            return Err(format!("input must be a JSON array, got {}", other.type_name()).into());
        }
    };
    let (context, name) = paths(&args.target);
    let count = items.len();

    config.write_configuration_collection(&context, &name, items)?;
    tracing::info!(context = %context, name = %name, items = count, "Collection written");
    Ok(())
}

/// Run the `delete` command
pub fn delete(
    config: &ContextAwareConfig<InMemory>,
    args: &TargetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let (context, name) = paths(args);
    config.delete_configuration(&context, &name)?;
    tracing::info!(context = %context, name = %name, "Configuration deleted");
    Ok(())
}

pub(crate) fn paths(target: &TargetArgs) -> (PathBuf, PathBuf) {
    (
        PathBuf::normalize(&target.context),
        PathBuf::normalize(&target.name),
    )
}
