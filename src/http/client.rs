//! Authenticated HTTP client with rate-limit handling
//!
//! Every request carries the bearer credential. A 429 response is waited
//! out using the server's `retry-after` delay and then retried, with no
//! retry ceiling. Any other non-success status is returned as an error.

use super::sleeper::{Sleeper, TokioSleeper};
use crate::error::{Error, Result};
use reqwest::header::ACCEPT;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Production Träwelling instance
pub const DEFAULT_BASE_URL: &str = "https://traewelling.de";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for relative request paths
    pub base_url: String,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("traewelling-export/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, sent in insertion order
    pub query: Vec<(String, String)>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Bearer-authenticated client for the Träwelling API
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    token: String,
    sleeper: Arc<dyn Sleeper>,
}

impl HttpClient {
    /// Create a client for the given bearer credential
    pub fn new(token: impl Into<String>, config: HttpClientConfig) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::MissingCredential);
        }

        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self {
            client,
            config,
            token,
            sleeper: Arc::new(TokioSleeper::default()),
        })
    }

    /// Replace the sleeper used for rate-limit waits
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// GET a URL and parse the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.get_json_with_config(url, RequestConfig::default())
            .await
    }

    /// GET a URL with extra query parameters and parse the JSON body
    pub async fn get_json_with_config<T: DeserializeOwned>(
        &self,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let response = self.get_with_config(url, config).await?;
        let json: T = response.json().await?;
        Ok(json)
    }

    /// GET a URL, waiting out any number of 429 responses
    pub async fn get_with_config(&self, url: &str, config: RequestConfig) -> Result<Response> {
        let full_url = self.build_url(url);
        let mut attempt: u32 = 0;

        loop {
            let mut req = self
                .client
                .get(&full_url)
                .bearer_auth(&self.token)
                .header(ACCEPT, "application/json");

            if !config.query.is_empty() {
                req = req.query(&config.query);
            }

            let response = req.send().await?;
            let status = response.status();
            attempt += 1;

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after =
                    extract_retry_after(&response).ok_or_else(|| Error::MissingRetryAfter {
                        url: full_url.clone(),
                    })?;
                let delay = Duration::from_secs(retry_after + 1);
                warn!(
                    "Waiting for end of rate limit... (attempt {}, {}s)",
                    attempt,
                    delay.as_secs()
                );
                self.sleeper.sleep(delay).await;
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::http_status(status.as_u16(), body));
            }

            debug!("Request succeeded: GET {} ({} attempts)", full_url, attempt);
            return Ok(response);
        }
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Extract the retry-after delay in whole seconds
fn extract_retry_after(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}
