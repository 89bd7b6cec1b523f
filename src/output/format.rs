//! Output format selection

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// File format of the export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON array of records
    #[default]
    Json,
    /// Header row plus one quoted row per record
    Csv,
}

impl OutputFormat {
    /// File extension, also substituted for `SUFFIX` in output paths
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(Error::invalid_value(
                "type",
                format!("unknown output format '{other}' (expected json or csv)"),
            )),
        }
    }
}
