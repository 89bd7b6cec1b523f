//! traewelling-export CLI
//!
//! Exports the check-in history of the account behind TRAEWELLING_TOKEN.

use clap::Parser;
use traewelling_export::cli::{Cli, Runner};
use traewelling_export::config;

#[tokio::main]
async fn main() {
    // Before parsing, so .env values can feed env-backed arguments
    config::load_dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
