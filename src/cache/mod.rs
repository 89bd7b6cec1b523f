//! Page cache module
//!
//! Maps a page number to the raw records of that page so later runs can
//! skip remote calls. The cache is purely an accelerator: deleting it at
//! any time only costs extra requests.
//!
//! # Overview
//!
//! - [`PageCache`] - store / retrieve / clear contract
//! - [`FilePageCache`] - gzip files in a directory, atomic writes
//! - [`MemoryPageCache`] - map-backed, for tests and library use
//!
//! A disabled cache turns every operation into a no-op or a miss.

mod codec;
mod file;
mod memory;

pub use file::FilePageCache;
pub use memory::MemoryPageCache;

use crate::error::Result;
use crate::types::{Page, StatusRecord};
use async_trait::async_trait;

/// Key-value store of pages by page number
#[async_trait]
pub trait PageCache: Send + Sync {
    /// Whether the cache does anything at all
    fn is_enabled(&self) -> bool;

    /// Persist a page, replacing any previous entry for it
    async fn store(&self, page: u32, records: &[StatusRecord]) -> Result<()>;

    /// Load a previously stored page, `None` when there is no entry
    async fn retrieve(&self, page: u32) -> Result<Option<Page>>;

    /// Remove every entry
    async fn clear(&self) -> Result<()>;
}
