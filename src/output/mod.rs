//! Output module
//!
//! Turns the accumulated records into the export file.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Selecting the output format (`json` or `csv`)
//! - Flattening typed statuses into export rows
//! - Writing the rows to a file exactly once

mod format;
mod row;
mod writer;

pub use format::OutputFormat;
pub use row::{to_rows, ExportRow};
pub use writer::{write_csv, write_file, write_json, write_rows};
