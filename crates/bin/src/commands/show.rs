//! Configuration display command.

use caconf::{ContextAwareConfig, Record, store::InMemory};

use crate::{
    cli::ShowArgs,
    commands::write::paths,
    output::{OutputFormat, print_table, property_rows},
};

/// Run the `show` command
pub fn show(
    config: &ContextAwareConfig<InMemory>,
    args: &ShowArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let (context, name) = paths(&args.target);

    if args.collection {
        let items = config.read_configuration_collection(&context, &name)?;
        match format {
            OutputFormat::Human => {
                if items.is_empty() {
                    println!("No items found.");
                    return Ok(());
                }
                let rows: Vec<Vec<String>> = items
                    .iter()
                    .flat_map(|(label, record)| property_rows(&[label.as_str()], record))
                    .collect();
                print_table(&["ITEM", "PROPERTY", "VALUE"], &rows);
            }
            OutputFormat::Json => {
                let items: Vec<serde_json::Value> = items
                    .into_iter()
                    .map(|(_, record)| serde_json::Value::from(record))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&items)?);
            }
        }
        return Ok(());
    }

    let Some(record) = config.read_configuration(&context, &name)? else {
        return Err(format!("no configuration '{name}' below {context}").into());
    };
    match format {
        OutputFormat::Human => print_record(&record),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&serde_json::Value::from(record))?);
        }
    }
    Ok(())
}

fn print_record(record: &Record) {
    if record.is_empty() {
        println!("No properties.");
    } else {
        print_table(&["PROPERTY", "VALUE"], &property_rows(&[], record));
    }
}
