//! In-memory page cache

use super::PageCache;
use crate::error::Result;
use crate::types::{Page, StatusRecord};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Page cache held in a map; clones share the same entries
#[derive(Debug, Clone)]
pub struct MemoryPageCache {
    pages: Arc<Mutex<BTreeMap<u32, Page>>>,
    enabled: bool,
}

impl MemoryPageCache {
    /// Create an empty, enabled cache
    pub fn new() -> Self {
        Self {
            pages: Arc::new(Mutex::new(BTreeMap::new())),
            enabled: true,
        }
    }

    /// Create a cache that never stores anything
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Create an enabled cache seeded with entries
    pub fn with_pages(pages: impl IntoIterator<Item = (u32, Page)>) -> Self {
        let cache = Self::new();
        cache.lock().extend(pages);
        cache
    }

    /// Page numbers that currently have an entry, ascending
    pub fn cached_pages(&self) -> Vec<u32> {
        self.lock().keys().copied().collect()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no entries are stored
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<u32, Page>> {
        // A poisoned map still holds complete entries; each insert is a single call
        self.pages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for MemoryPageCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageCache for MemoryPageCache {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn store(&self, page: u32, records: &[StatusRecord]) -> Result<()> {
        if self.enabled {
            self.lock().insert(page, records.to_vec());
        }
        Ok(())
    }

    async fn retrieve(&self, page: u32) -> Result<Option<Page>> {
        if !self.enabled {
            return Ok(None);
        }
        Ok(self.lock().get(&page).cloned())
    }

    async fn clear(&self) -> Result<()> {
        if self.enabled {
            self.lock().clear();
        }
        Ok(())
    }
}
