//! Pagination result types

use crate::types::StatusRecord;

/// Statistics from one export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Total records accumulated
    pub records: usize,
    /// Pages fetched from the service, excluding the final empty one
    pub pages_fetched: usize,
    /// Pages served from the cache
    pub pages_from_cache: usize,
    /// Status page requests sent, including the final empty one
    pub remote_calls: usize,
    /// Whether a diverging first page invalidated the cache
    pub invalidated: bool,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a page that came from the service
    pub fn add_fetched_page(&mut self, records: usize) {
        self.pages_fetched += 1;
        self.records += records;
    }

    /// Count a page that came from the cache
    pub fn add_cached_page(&mut self, records: usize) {
        self.pages_from_cache += 1;
        self.records += records;
    }

    /// Count a status page request
    pub fn add_remote_call(&mut self) {
        self.remote_calls += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}

/// Everything one run produced
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// Account the history belongs to
    pub username: String,
    /// All records in service order
    pub records: Vec<StatusRecord>,
    /// Run statistics
    pub stats: SyncStats,
}
