//! Sequential page retrieval with cache reconciliation
//!
//! Pages are walked from 1 upwards. Cached pages other than the first are
//! trusted as-is. Page 1 is always fetched: if the fresh copy differs from
//! the cached one (length or ids by position), the whole cache is dropped,
//! because edits to the history shift every later page too. The loop only
//! ends on an empty page from the service, so the tail of every run is live.
//!
//! An unreadable cache entry counts as missing and is overwritten by the
//! fresh page. I/O failures on the cache directory still abort the run.

use super::endpoints;
use super::types::{ExportOutcome, SyncStats};
use crate::cache::PageCache;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::{same_ids, Envelope, Page, StatusRecord, User};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Drives a full export of one user's status history
pub struct PaginationController {
    client: HttpClient,
    cache: Box<dyn PageCache>,
    stats: SyncStats,
}

impl PaginationController {
    /// Create a controller over a client and a cache
    pub fn new(client: HttpClient, cache: Box<dyn PageCache>) -> Self {
        Self {
            client,
            cache,
            stats: SyncStats::default(),
        }
    }

    /// Get statistics of the last run
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Get the cache
    pub fn cache(&self) -> &dyn PageCache {
        self.cache.as_ref()
    }

    /// Resolve the username, then collect the whole history
    pub async fn run(&mut self) -> Result<ExportOutcome> {
        let username = self.resolve_username().await?;
        let records = self.collect(&username).await?;

        Ok(ExportOutcome {
            username,
            records,
            stats: self.stats.clone(),
        })
    }

    /// Ask the identity endpoint who the credential belongs to
    pub async fn resolve_username(&self) -> Result<String> {
        let url = endpoints::identity_url(&self.client.config().base_url)?;
        let me: Envelope<User> = self.client.get_json(&url).await?;
        debug!("Authenticated as {}", me.data.username);
        Ok(me.data.username)
    }

    /// Fetch one page of statuses from the service
    pub async fn fetch_page(&self, username: &str, page: u32) -> Result<Page> {
        let url = endpoints::statuses_url(&self.client.config().base_url, username)?;
        let response: Envelope<Page> = self
            .client
            .get_json_with_config(&url, RequestConfig::new().query("page", page.to_string()))
            .await?;
        Ok(response.data)
    }

    /// Cached copy of a page, with corrupt entries treated as absent
    async fn retrieve_cached(&self, page: u32) -> Result<Option<Page>> {
        match self.cache.retrieve(page).await {
            Err(Error::CacheCorrupt { path, message }) => {
                warn!(
                    "Ignoring corrupt cache entry {}: {}",
                    path.display(),
                    message
                );
                Ok(None)
            }
            other => other,
        }
    }

    /// Walk all pages for `username` and return the records in service order
    pub async fn collect(&mut self, username: &str) -> Result<Vec<StatusRecord>> {
        let start = Instant::now();
        self.stats = SyncStats::default();

        let mut records = Vec::new();
        let mut page: u32 = 1;

        info!("Fetching statuses...");
        loop {
            info!("Page {}", page);
            let cached = self.retrieve_cached(page).await?;

            if page != 1 {
                if let Some(cached) = cached {
                    debug!("Page {} served from cache", page);
                    self.stats.add_cached_page(cached.len());
                    records.extend(cached);
                    page += 1;
                    continue;
                }
            } else if cached.is_none() {
                // No usable first page: whatever else is cached can't be trusted
                self.cache.clear().await?;
            }

            self.stats.add_remote_call();
            let fresh = self.fetch_page(username, page).await?;
            if fresh.is_empty() {
                debug!("Page {} is empty, history complete", page);
                break;
            }

            if let Some(cached) = &cached {
                if !same_ids(cached, &fresh) {
                    info!("First page changed since the last run, invalidating cache");
                    self.cache.clear().await?;
                    self.stats.invalidated = true;
                }
            }

            self.cache.store(page, &fresh).await?;
            self.stats.add_fetched_page(fresh.len());
            records.extend(fresh);
            page += 1;
        }

        self.stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            "Collected {} statuses: {} pages fetched, {} from cache",
            self.stats.records, self.stats.pages_fetched, self.stats.pages_from_cache
        );

        Ok(records)
    }
}

impl std::fmt::Debug for PaginationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationController")
            .field("client", &self.client)
            .field("cache_enabled", &self.cache.is_enabled())
            .field("stats", &self.stats)
            .finish()
    }
}
