//! Export configuration
//!
//! Everything a run needs, as plain values. The environment is only read
//! here (`.env` file and `TRAEWELLING_TOKEN`); the rest of the crate takes
//! an [`ExportConfig`].

use crate::cache::FilePageCache;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, DEFAULT_BASE_URL};
use crate::output::OutputFormat;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

/// Environment variable holding the bearer credential
pub const TOKEN_ENV: &str = "TRAEWELLING_TOKEN";

/// Environment variable overriding the service URL
pub const BASE_URL_ENV: &str = "TRAEWELLING_URL";

/// Placeholder in the output path replaced by the format's extension
pub const SUFFIX_PLACEHOLDER: &str = "SUFFIX";

/// Default output path template
pub const DEFAULT_OUTPUT_TEMPLATE: &str = "output.SUFFIX";

/// Platform cache directory for this tool, if the platform has one
pub fn default_cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "adridevelopsthings", "traewelling-export")
        .map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Load a `.env` file from the working directory or its parents, if any
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => debug!("Ignoring unreadable .env file: {e}"),
    }
}

/// Read the bearer credential from the environment
pub fn token_from_env() -> Result<String> {
    match std::env::var(TOKEN_ENV) {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(Error::MissingCredential),
    }
}

/// Complete configuration for one export run
#[derive(Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Bearer credential
    pub token: String,
    /// Service base URL
    pub base_url: String,
    /// Cache root; `None` means no cache location is available
    pub cache_dir: Option<PathBuf>,
    /// Whether the page cache is used at all
    pub cache_enabled: bool,
    /// Output file format
    pub format: OutputFormat,
    /// Output path, `SUFFIX` is replaced by the format's extension
    pub output_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_dir: default_cache_dir(),
            cache_enabled: true,
            format: OutputFormat::default(),
            output_template: DEFAULT_OUTPUT_TEMPLATE.to_string(),
        }
    }
}

impl ExportConfig {
    /// Create a new config builder
    pub fn builder() -> ExportConfigBuilder {
        ExportConfigBuilder::default()
    }

    /// Check the configuration before any network activity
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(Error::MissingCredential);
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", format!("'{}': {e}", self.base_url)))?;

        if self.output_template.trim().is_empty() {
            return Err(Error::invalid_value("output", "output path must not be empty"));
        }

        Ok(())
    }

    /// Output path with `SUFFIX` replaced by the format's extension
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(
            self.output_template
                .replace(SUFFIX_PLACEHOLDER, self.format.extension()),
        )
    }

    /// Whether pages will actually be cached
    pub fn uses_cache(&self) -> bool {
        self.cache_enabled
            && self
                .cache_dir
                .as_ref()
                .is_some_and(|dir| !dir.as_os_str().is_empty())
    }

    /// HTTP client configuration derived from this config
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder().base_url(&self.base_url).build()
    }

    /// Page cache derived from this config
    pub fn page_cache(&self) -> FilePageCache {
        match &self.cache_dir {
            Some(dir) if self.uses_cache() => FilePageCache::new(dir, true),
            _ => FilePageCache::disabled(),
        }
    }
}

impl std::fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("cache_dir", &self.cache_dir)
            .field("cache_enabled", &self.cache_enabled)
            .field("format", &self.format)
            .field("output_template", &self.output_template)
            .finish()
    }
}

/// Builder for [`ExportConfig`]
#[derive(Default)]
pub struct ExportConfigBuilder {
    config: ExportConfig,
}

impl ExportConfigBuilder {
    /// Set the bearer credential
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = token.into();
        self
    }

    /// Set the service base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the cache root
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.cache_dir = Some(dir.into());
        self
    }

    /// Turn the page cache off
    pub fn disable_cache(mut self) -> Self {
        self.config.cache_enabled = false;
        self
    }

    /// Set the output format
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Set the output path template
    pub fn output(mut self, template: impl Into<String>) -> Self {
        self.config.output_template = template.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ExportConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::PageCache;

    #[test]
    fn test_default_config() {
        let config = ExportConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.cache_enabled);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.output_template, "output.SUFFIX");
    }

    #[test]
    fn test_output_path_substitutes_suffix() {
        let config = ExportConfig::builder().format(OutputFormat::Csv).build();
        assert_eq!(config.output_path(), PathBuf::from("output.csv"));

        let config = ExportConfig::builder()
            .output("exports/SUFFIX/history.SUFFIX")
            .build();
        assert_eq!(
            config.output_path(),
            PathBuf::from("exports/json/history.json")
        );

        let config = ExportConfig::builder().output("fixed.txt").build();
        assert_eq!(config.output_path(), PathBuf::from("fixed.txt"));
    }

    #[test]
    fn test_validate_requires_token() {
        let config = ExportConfig::builder().build();
        assert!(matches!(config.validate(), Err(Error::MissingCredential)));

        let config = ExportConfig::builder().token("   ").build();
        assert!(matches!(config.validate(), Err(Error::MissingCredential)));

        let config = ExportConfig::builder().token("abc").build();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ExportConfig::builder()
            .token("abc")
            .base_url("not a url")
            .build();
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfigValue { .. })
        ));

        let config = ExportConfig::builder().token("abc").output(" ").build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_page_cache_follows_flags() {
        let config = ExportConfig::builder().cache_dir("/tmp/te-cache").build();
        assert!(config.uses_cache());
        assert!(config.page_cache().is_enabled());

        let config = ExportConfig::builder()
            .cache_dir("/tmp/te-cache")
            .disable_cache()
            .build();
        assert!(!config.uses_cache());
        assert!(!config.page_cache().is_enabled());

        let config = ExportConfig::builder().cache_dir("").build();
        assert!(!config.uses_cache());
    }

    #[test]
    fn test_http_config() {
        let config = ExportConfig::builder()
            .base_url("http://localhost:9999")
            .build();
        assert_eq!(config.http_config().base_url, "http://localhost:9999");

        let http = ExportConfig::default().http_config();
        assert_eq!(http.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ExportConfig::builder().token("super-secret").build();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
