//! HTTP client module
//!
//! Provides the bearer-authenticated client used for every API call.
//!
//! # Features
//!
//! - **Rate-limit recovery**: 429 responses are retried after `retry-after + 1` seconds
//! - **Injectable waiting**: delays go through a [`Sleeper`] so tests need no real time

mod client;
mod sleeper;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig, DEFAULT_BASE_URL,
};
pub use sleeper::{RecordingSleeper, Sleeper, TokioSleeper, DEFAULT_PROGRESS_INTERVAL};

#[cfg(test)]
mod tests;
