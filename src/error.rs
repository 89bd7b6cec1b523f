//! Error types for traewelling-export
//!
//! This module defines the error hierarchy for the whole exporter.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for traewelling-export
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Environment variable 'TRAEWELLING_TOKEN' must be set")]
    MissingCredential,

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limited by {url} without a usable retry-after header")]
    MissingRetryAfter { url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Malformed status {id}: {message}")]
    MalformedStatus { id: String, message: String },

    // ============================================================================
    // Cache Errors
    // ============================================================================
    #[error("Cache I/O error at {}: {source}", path.display())]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt cache entry {}: {message}", path.display())]
    CacheCorrupt { path: PathBuf, message: String },

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Output error: {message}")]
    Output { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a malformed status error
    pub fn malformed_status(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedStatus {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Create a cache I/O error for the given path
    pub fn cache_io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::CacheIo {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a corrupt cache entry error
    pub fn cache_corrupt(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::CacheCorrupt {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// HTTP status code carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error originated in the page cache
    pub fn is_cache(&self) -> bool {
        matches!(self, Error::CacheIo { .. } | Error::CacheCorrupt { .. })
    }
}

/// Result type alias for traewelling-export
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_value("output", "output path must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'output': output path must not be empty"
        );

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::MissingCredential;
        assert_eq!(
            err.to_string(),
            "Environment variable 'TRAEWELLING_TOKEN' must be set"
        );
    }

    #[test]
    fn test_status() {
        assert_eq!(Error::http_status(500, "").status(), Some(500));
        assert_eq!(Error::MissingCredential.status(), None);
    }

    #[test]
    fn test_is_cache() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(Error::cache_io("/tmp/cache/page_1.json.gz", io).is_cache());
        assert!(Error::cache_corrupt("/tmp/cache/page_1.json.gz", "bad gzip").is_cache());

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!Error::Io(io).is_cache());
        assert!(!Error::http_status(404, "").is_cache());
    }

    #[test]
    fn test_cache_error_mentions_path() {
        let err = Error::cache_corrupt("/tmp/cache/page_3.json.gz", "unexpected EOF");
        let message = err.to_string();
        assert!(message.contains("page_3.json.gz"));
        assert!(message.contains("unexpected EOF"));
    }
}
