//! CLI runner - executes an export

use crate::cli::commands::Cli;
use crate::config::{self, ExportConfig};
use crate::error::Result;
use crate::http::HttpClient;
use crate::output::{self, to_rows};
use crate::pagination::{PaginationController, SyncStats};
use std::path::PathBuf;
use tracing::info;

/// Result of a completed export
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Account that was exported
    pub username: String,
    /// File that was written
    pub path: PathBuf,
    /// Number of statuses written
    pub records: usize,
    /// Pagination statistics
    pub stats: SyncStats,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the export configuration from the arguments and a credential
    pub fn config(&self, token: impl Into<String>) -> ExportConfig {
        let mut builder = ExportConfig::builder()
            .token(token)
            .base_url(&self.cli.base_url)
            .format(self.cli.format)
            .output(&self.cli.output);

        if let Some(dir) = &self.cli.cache_directory {
            builder = builder.cache_dir(dir);
        }
        if self.cli.disable_cache {
            builder = builder.disable_cache();
        }

        builder.build()
    }

    /// Run the export with the credential from the environment
    pub async fn run(&self) -> Result<ExportSummary> {
        let token = config::token_from_env()?;
        run_export(&self.config(token)).await
    }
}

/// Export the full history described by `config`
pub async fn run_export(config: &ExportConfig) -> Result<ExportSummary> {
    config.validate()?;
    let client = HttpClient::new(&config.token, config.http_config())?;
    run_export_with_client(config, client).await
}

/// Export using an already configured client
pub async fn run_export_with_client(
    config: &ExportConfig,
    client: HttpClient,
) -> Result<ExportSummary> {
    config.validate()?;
    let path = config.output_path();

    let mut controller = PaginationController::new(client, Box::new(config.page_cache()));
    let outcome = controller.run().await?;

    let rows = to_rows(&outcome.records)?;
    output::write_file(&path, &rows, config.format)?;

    info!(
        "Wrote {} statuses of {} to {}",
        rows.len(),
        outcome.username,
        path.display()
    );

    Ok(ExportSummary {
        username: outcome.username,
        path,
        records: rows.len(),
        stats: outcome.stats,
    })
}
