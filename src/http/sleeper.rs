//! Suspension used while waiting out a rate limit
//!
//! The client never calls `tokio::time::sleep` directly; it goes through a
//! [`Sleeper`] so tests can observe the requested delays without waiting.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

/// Something that can suspend the current task
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend for the given duration
    async fn sleep(&self, duration: Duration);
}

/// Default interval between "still waiting" messages
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(5);

/// Real sleeper backed by the tokio timer.
///
/// Long waits are split into slices so progress is reported regularly.
#[derive(Debug, Clone)]
pub struct TokioSleeper {
    progress_interval: Duration,
}

impl TokioSleeper {
    /// Create a sleeper reporting progress every `progress_interval`
    pub fn new(progress_interval: Duration) -> Self {
        let progress_interval = if progress_interval.is_zero() {
            DEFAULT_PROGRESS_INTERVAL
        } else {
            progress_interval
        };
        Self { progress_interval }
    }
}

impl Default for TokioSleeper {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_INTERVAL)
    }
}

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        let mut remaining = duration;
        while !remaining.is_zero() {
            let slice = remaining.min(self.progress_interval);
            tokio::time::sleep(slice).await;
            remaining -= slice;
            if !remaining.is_zero() {
                info!(
                    "Waiting for end of rate limit... {}s left",
                    remaining.as_secs_f32().ceil()
                );
            }
        }
    }
}

/// Sleeper that returns immediately and records every requested delay
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All delays requested so far
    pub fn delays(&self) -> Vec<Duration> {
        self.delays
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }

    /// Sum of all requested delays
    pub fn total(&self) -> Duration {
        self.delays().iter().sum()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        if let Ok(mut delays) = self.delays.lock() {
            delays.push(duration);
        }
    }
}
