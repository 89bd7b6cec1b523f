//! CLI argument parsing

use crate::config::{BASE_URL_ENV, DEFAULT_OUTPUT_TEMPLATE};
use crate::http::DEFAULT_BASE_URL;
use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Export your Träwelling check-in history to JSON or CSV.
///
/// The bearer token is read from the TRAEWELLING_TOKEN environment
/// variable (a .env file in the working directory is honored).
#[derive(Parser, Debug)]
#[command(name = "traewelling-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output file format
    #[arg(short = 't', long = "type", value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Output file path; SUFFIX is replaced by the format's extension
    #[arg(short, long, default_value = DEFAULT_OUTPUT_TEMPLATE)]
    pub output: String,

    /// Page cache directory (defaults to the platform cache directory)
    #[arg(short, long)]
    pub cache_directory: Option<PathBuf>,

    /// Do not read or write the page cache
    #[arg(long)]
    pub disable_cache: bool,

    /// Träwelling instance to export from
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["traewelling-export"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.output, "output.SUFFIX");
        assert!(cli.cache_directory.is_none());
        assert!(!cli.disable_cache);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "traewelling-export",
            "-t",
            "csv",
            "-o",
            "history.SUFFIX",
            "-c",
            "/tmp/te-cache",
            "--disable-cache",
            "--base-url",
            "http://localhost:8000",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Csv);
        assert_eq!(cli.output, "history.SUFFIX");
        assert_eq!(cli.cache_directory, Some(PathBuf::from("/tmp/te-cache")));
        assert!(cli.disable_cache);
        assert_eq!(cli.base_url, "http://localhost:8000");
        assert!(cli.verbose);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = Cli::try_parse_from(["traewelling-export", "--type", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_command_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
