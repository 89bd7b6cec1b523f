//! File-backed page cache
//!
//! One gzip file per page, `page_<n>.json.gz`, in a single directory.
//! Writes go through a temp file and a rename so an interrupted run never
//! leaves a half-written entry behind.

use super::codec;
use super::PageCache;
use crate::error::{Error, Result};
use crate::types::{Page, StatusRecord};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

const ENTRY_PREFIX: &str = "page";
const ENTRY_SUFFIX: &str = ".json.gz";
const TEMP_SUFFIX: &str = ".json.gz.tmp";

/// Page cache stored in a directory on disk
#[derive(Debug, Clone)]
pub struct FilePageCache {
    dir: PathBuf,
    enabled: bool,
}

impl FilePageCache {
    /// Create a cache rooted at `dir`.
    ///
    /// An empty path disables the cache just like `enabled = false`.
    pub fn new(dir: impl AsRef<Path>, enabled: bool) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let enabled = enabled && !dir.as_os_str().is_empty();
        Self { dir, enabled }
    }

    /// Create a cache that never touches the filesystem
    pub fn disabled() -> Self {
        Self {
            dir: PathBuf::new(),
            enabled: false,
        }
    }

    /// Location of the entry for a page
    pub fn entry_path(&self, page: u32) -> PathBuf {
        self.dir.join(format!("{ENTRY_PREFIX}_{page}{ENTRY_SUFFIX}"))
    }

    /// Page numbers that currently have an entry, ascending
    pub async fn cached_pages(&self) -> Result<Vec<u32>> {
        if !self.enabled {
            return Ok(Vec::new());
        }

        let mut pages = Vec::new();
        for name in self.entry_names().await? {
            let number = name
                .strip_prefix("page_")
                .and_then(|rest| rest.strip_suffix(ENTRY_SUFFIX))
                .and_then(|n| n.parse::<u32>().ok());
            if let Some(number) = number {
                pages.push(number);
            }
        }
        pages.sort_unstable();
        Ok(pages)
    }

    /// Names of files in the cache directory that follow the entry naming scheme
    async fn entry_names(&self) -> Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::cache_io(&self.dir, e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::cache_io(&self.dir, e))?
        {
            let name = entry.file_name().to_string_lossy().to_string();
            if is_entry_name(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }
}

/// Whether a file name belongs to this cache (finished entries and leftover temp files)
fn is_entry_name(name: &str) -> bool {
    name.starts_with(ENTRY_PREFIX) && (name.ends_with(ENTRY_SUFFIX) || name.ends_with(TEMP_SUFFIX))
}

#[async_trait]
impl PageCache for FilePageCache {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn store(&self, page: u32, records: &[StatusRecord]) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| Error::cache_io(&self.dir, e))?;

        let path = self.entry_path(page);
        let bytes = codec::encode(records).map_err(|e| Error::cache_io(&path, e))?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.dir.join(format!("{ENTRY_PREFIX}_{page}{TEMP_SUFFIX}"));
        let mut file = tokio::fs::File::create(&temp_path)
            .await
            .map_err(|e| Error::cache_io(&temp_path, e))?;
        file.write_all(&bytes)
            .await
            .map_err(|e| Error::cache_io(&temp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| Error::cache_io(&temp_path, e))?;
        drop(file);

        tokio::fs::rename(&temp_path, &path)
            .await
            .map_err(|e| Error::cache_io(&path, e))?;

        debug!(
            "Cached page {} ({} records, {} bytes)",
            page,
            records.len(),
            bytes.len()
        );
        Ok(())
    }

    async fn retrieve(&self, page: u32) -> Result<Option<Page>> {
        if !self.enabled {
            return Ok(None);
        }

        let path = self.entry_path(page);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::cache_io(&path, e)),
        };

        let records = codec::decode(&bytes).map_err(|e| Error::cache_corrupt(&path, e.to_string()))?;
        Ok(Some(records))
    }

    async fn clear(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let names = self.entry_names().await?;
        for name in &names {
            let path = self.dir.join(name);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(Error::cache_io(&path, e)),
            }
        }

        debug!("Cleared {} cache entries in {}", names.len(), self.dir.display());
        Ok(())
    }
}
