//! Persistent game cache
//!
//! Combines the blob store (artifact files) with the cache index (one JSON
//! metadata document). The index is authoritative for lookups; the blob
//! files are the durable ground truth for content.

pub mod blob;
pub mod index;

use std::path::Path;

use crate::error::StoreError;

pub use blob::BlobStore;
pub use index::{CacheEntry, CacheIndex, INDEX_FILE};

type Result<T> = std::result::Result<T, StoreError>;

/// Sentinel recorded when no model or project name is known
pub const UNKNOWN: &str = "unknown";

/// Write-through cache of generated game artifacts
pub struct GameCache {
    blobs: BlobStore,
    index: CacheIndex,
}

/// Aggregate cache statistics for status reporting
#[derive(Debug)]
pub struct CacheStats {
    pub entries: usize,
    pub total_size_bytes: u64,
}

impl GameCache {
    /// Open the cache rooted at `dir`, creating the directory and loading
    /// the index document
    pub fn open(dir: &Path) -> Result<Self> {
        let blobs = BlobStore::open(dir)?;
        let index = CacheIndex::load(&dir.join(INDEX_FILE));
        Ok(Self { blobs, index })
    }

    /// Persist an artifact and track it in the index.
    ///
    /// The blob write must succeed before the index is touched, so a store
    /// failure never leaves the index pointing at a missing file. The
    /// reverse gap remains: if the index write fails after the blob landed,
    /// the artifact exists untracked. That is logged, not rolled back.
    pub fn save(&self, id: &str, html: &str, produced_by: &str, label: &str) -> Result<CacheEntry> {
        let bytes = html.as_bytes();
        let location = self.blobs.put(id, bytes)?;

        let entry = CacheEntry::new(location, bytes.len() as u64, produced_by, label);
        if let Err(e) = self.index.upsert(id, entry.clone()) {
            log::error!(
                "Artifact for '{}' saved but index update failed, entry is untracked: {}",
                id,
                e
            );
        } else {
            log::info!("Saved game to disk: {} ({:.1} KB)", id, bytes.len() as f64 / 1024.0);
        }

        Ok(entry)
    }

    /// Load a cached artifact, bumping its last-access time.
    ///
    /// Returns `None` for ids the index does not know. An indexed entry
    /// whose blob has gone missing is removed from the index on the spot
    /// and reported as absent.
    pub fn lookup(&self, id: &str) -> Result<Option<(Vec<u8>, CacheEntry)>> {
        let Some(entry) = self.index.get(id) else {
            return Ok(None);
        };

        match self.blobs.read(&entry.storage_location) {
            Ok(bytes) => {
                self.index.touch(id)?;
                log::info!("Loaded cached game: {}", id);
                Ok(Some((bytes, entry)))
            }
            Err(StoreError::NotFound(location)) => {
                log::warn!("Game file not found, dropping stale entry: {}", location);
                self.index.remove(id)?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Load a cached artifact or fail with `NotFound`
    pub fn load(&self, id: &str) -> Result<Vec<u8>> {
        match self.lookup(id)? {
            Some((bytes, _)) => Ok(bytes),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    /// Index metadata for an id, without touching access time
    pub fn entry(&self, id: &str) -> Option<CacheEntry> {
        self.index.get(id)
    }

    /// Delete one cached game. Returns whether it existed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let Some(entry) = self.index.get(id) else {
            return Ok(false);
        };

        self.blobs.remove(&entry.storage_location)?;
        self.index.remove(id)?;
        log::info!("Deleted cached game: {}", id);
        Ok(true)
    }

    /// Delete every cached game, returning how many were removed
    pub fn clear(&self) -> Result<usize> {
        let ids: Vec<String> = self.index.list().into_iter().map(|(id, _)| id).collect();
        let mut deleted = 0;
        for id in ids {
            if self.delete(&id)? {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    /// All cached entries with their ids
    pub fn entries(&self) -> Vec<(String, CacheEntry)> {
        self.index.list()
    }

    /// Entry count and total artifact size
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.index.len(),
            total_size_bytes: self.index.total_size_bytes(),
        }
    }
}
