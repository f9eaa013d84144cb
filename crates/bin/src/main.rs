use clap::Parser;
use tracing_subscriber::EnvFilter;

mod backend;
mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};
use output::OutputFormat;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("caconf=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let format = OutputFormat::from_flag(cli.json);

    match &cli.command {
        Commands::CreateContext(args) => {
            let store = backend::open_store(&cli.store)?;
            commands::context::create(&store, args)
        }
        Commands::Write(args) => commands::write::write(&backend::create_config(&cli)?, args),
        Commands::WriteCollection(args) => {
            commands::write::write_collection(&backend::create_config(&cli)?, args)
        }
        Commands::Delete(args) => commands::write::delete(&backend::create_config(&cli)?, args),
        Commands::Show(args) => commands::show::show(&backend::create_config(&cli)?, args, format),
    }
}
