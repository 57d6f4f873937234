//! Persistent index of cached games
//!
//! The whole index is one pretty-printed JSON document next to the blobs,
//! loaded once at open and rewritten after every mutation. Keeping it as a
//! single human-readable file makes the cache diffable and hand-editable.
//! Write cost is O(index size) per mutation, acceptable at the few-thousand
//! entry scale this tool operates at.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

type Result<T> = std::result::Result<T, StoreError>;

/// Index document file name inside the storage directory
pub const INDEX_FILE: &str = "games-index.json";

/// Metadata for one cached game artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// Blob file name, relative to the storage directory
    pub storage_location: String,

    /// Artifact byte length at write time
    pub size_bytes: u64,

    /// When the artifact was generated or saved
    pub created_at: DateTime<Utc>,

    /// Model that produced the artifact ("unknown" for external saves)
    pub produced_by: String,

    /// Human-readable project name
    pub label: String,

    /// Updated on every successful load. Recorded for future policy use;
    /// nothing evicts on it today.
    pub last_accessed_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Build a fresh entry stamped with the current time
    pub fn new(storage_location: String, size_bytes: u64, produced_by: &str, label: &str) -> Self {
        let now = Utc::now();
        Self {
            storage_location,
            size_bytes,
            created_at: now,
            produced_by: produced_by.to_string(),
            label: label.to_string(),
            last_accessed_at: now,
        }
    }
}

/// In-memory id -> entry mapping with synchronous full-document persistence.
///
/// All mutation happens under one mutex, which also serializes the document
/// rewrite, so concurrent writers can never interleave on disk.
pub struct CacheIndex {
    path: PathBuf,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl CacheIndex {
    /// Load the index document, or start empty.
    ///
    /// A missing file is a fresh cache. An unreadable or unparsable file is
    /// logged and treated as empty rather than failing the process; the
    /// entries are reconstructable by regeneration.
    pub fn load(path: &Path) -> Self {
        let entries = match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<HashMap<String, CacheEntry>>(&contents) {
                Ok(entries) => {
                    log::info!("Loaded {} cached games", entries.len());
                    entries
                }
                Err(e) => {
                    log::warn!("Could not parse games index, starting empty: {}", e);
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                log::warn!("Could not read games index, starting empty: {}", e);
                HashMap::new()
            }
        };

        Self {
            path: path.to_path_buf(),
            entries: Mutex::new(entries),
        }
    }

    /// Look up an entry by id
    pub fn get(&self, id: &str) -> Option<CacheEntry> {
        self.entries.lock().unwrap().get(id).cloned()
    }

    /// Insert or replace an entry and persist the full document
    pub fn upsert(&self, id: &str, entry: CacheEntry) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(id.to_string(), entry);
        Self::persist(&self.path, &entries)
    }

    /// Remove an entry, persisting if something was actually removed
    pub fn remove(&self, id: &str) -> Result<bool> {
        let mut entries = self.entries.lock().unwrap();
        if entries.remove(id).is_none() {
            return Ok(false);
        }
        Self::persist(&self.path, &entries)?;
        Ok(true)
    }

    /// Bump `lastAccessedAt` for an id. Unknown ids are a no-op.
    pub fn touch(&self, id: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get_mut(id) {
            Some(entry) => entry.last_accessed_at = Utc::now(),
            None => return Ok(()),
        }
        Self::persist(&self.path, &entries)
    }

    /// All entries. Iteration order carries no meaning.
    pub fn list(&self) -> Vec<(String, CacheEntry)> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|(id, entry)| (id.clone(), entry.clone()))
            .collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Sum of artifact sizes across all entries
    pub fn total_size_bytes(&self) -> u64 {
        self.entries
            .lock()
            .unwrap()
            .values()
            .map(|e| e.size_bytes)
            .sum()
    }

    /// Rewrite the whole document via a temp file and atomic rename
    fn persist(path: &Path, entries: &HashMap<String, CacheEntry>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Io(format!("Failed to serialize games index: {}", e)))?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .map_err(|e| StoreError::Io(format!("Failed to write games index: {}", e)))?;
        std::fs::rename(&tmp, path)
            .map_err(|e| StoreError::Io(format!("Failed to finalize games index: {}", e)))?;

        Ok(())
    }
}
