//! Pagination module
//!
//! Walks a user's status history page by page, consulting the page cache
//! before every remote call and invalidating it when the first page no
//! longer matches.
//!
//! # Overview
//!
//! - `PaginationController` - resolves the user and drives the page loop
//! - `SyncStats` / `ExportOutcome` - what a run produced
//! - `endpoints` - API v1 URL construction

pub mod endpoints;

mod controller;
mod types;

pub use controller::PaginationController;
pub use types::{ExportOutcome, SyncStats};
