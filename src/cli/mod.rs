//! CLI module
//!
//! Command-line interface for running an export.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::{run_export, run_export_with_client, ExportSummary, Runner};
