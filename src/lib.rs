// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # traewelling-export
//!
//! Exports a Träwelling user's check-in history to a JSON or CSV file.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use traewelling_export::cli::run_export;
//! use traewelling_export::config::ExportConfig;
//! use traewelling_export::output::OutputFormat;
//!
//! #[tokio::main]
//! async fn main() -> traewelling_export::Result<()> {
//!     let config = ExportConfig::builder()
//!         .token(std::env::var("TRAEWELLING_TOKEN").unwrap_or_default())
//!         .format(OutputFormat::Csv)
//!         .build();
//!
//!     let summary = run_export(&config).await?;
//!     println!("wrote {} statuses to {}", summary.records, summary.path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │            CLI (clap) → ExportConfig → Runner            │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌────────────────────────────┴─────────────────────────────┐
//! │                 PaginationController                     │
//! │  page 1..N, cache check, first-page reconciliation       │
//! └──────────────┬──────────────────────────┬────────────────┘
//!                │                          │
//! ┌──────────────┴─────────────┐ ┌──────────┴───────────────┐
//! │ HttpClient                 │ │ PageCache                │
//! │ bearer auth, 429 + retry   │ │ gzip files / in-memory   │
//! └────────────────────────────┘ └──────────────────────────┘
//!                              │
//! ┌────────────────────────────┴─────────────────────────────┐
//! │        output: typed rows → JSON / CSV, written once     │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Status records and API envelopes
pub mod types;

/// HTTP client with rate-limit handling
pub mod http;

/// Page cache
pub mod cache;

/// Page-by-page history retrieval
pub mod pagination;

/// JSON / CSV output
pub mod output;

/// Run configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::{Page, Status, StatusRecord};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
