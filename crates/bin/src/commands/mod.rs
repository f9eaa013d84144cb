//! Subcommand implementations.

pub mod context;
pub mod show;
pub mod write;
