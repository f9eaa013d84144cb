//! CLI argument definitions for the caconf binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Naming strategy used to place configurations in the store
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Strategy {
    /// Physical paths equal logical names (default)
    #[default]
    Identity,
    /// Store data in a `jcr:content` child of each configuration and item
    ContentNode,
    /// Like content-node, and also redirect collection parents
    ContentNodeParents,
}

/// Context-aware configuration store
#[derive(Parser, Debug)]
#[command(name = "caconf")]
#[command(about = "caconf: write nested configurations into a hierarchical store")]
#[command(version)]
pub struct Cli {
    /// JSON file backing the store. Loaded if present, rewritten on every commit.
    #[arg(short, long, global = true, default_value = "caconf.json", env = "CACONF_STORE")]
    pub store: PathBuf,

    /// Naming strategy
    #[arg(long, global = true, default_value = "identity", env = "CACONF_STRATEGY")]
    pub strategy: Strategy,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a configuration from a JSON object
    Write(WriteArgs),
    /// Replace a configuration collection from a JSON array of objects
    WriteCollection(WriteArgs),
    /// Print a stored configuration
    Show(ShowArgs),
    /// Delete a configuration
    Delete(TargetArgs),
    /// Create a context node
    CreateContext(CreateContextArgs),
}

/// Context node and configuration name
#[derive(clap::Args, Debug)]
pub struct TargetArgs {
    /// Path of the context node
    #[arg(short, long)]
    pub context: String,

    /// Configuration name, relative to the context's configuration root
    #[arg(short, long)]
    pub name: String,
}

/// Arguments for the write commands
#[derive(clap::Args, Debug)]
pub struct WriteArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// JSON input file, or `-` for stdin
    pub input: PathBuf,
}

/// Arguments for the show command
#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Show the configuration as a collection
    #[arg(long)]
    pub collection: bool,
}

/// Arguments for the create-context command
#[derive(clap::Args, Debug)]
pub struct CreateContextArgs {
    /// Path of the new context node
    pub path: String,

    /// Store configurations below this path instead of the context node
    #[arg(long)]
    pub config_ref: Option<String>,
}
