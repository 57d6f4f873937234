//! Artifact blob files on disk
//!
//! One HTML file per game id under the storage directory. Writes land in a
//! temporary file first and are renamed into place, so a reader never sees
//! a partially written artifact.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::StoreError;

type Result<T> = std::result::Result<T, StoreError>;

/// File-backed artifact storage, ground truth for game content
pub struct BlobStore {
    dir: PathBuf,
}

impl BlobStore {
    /// Open blob storage rooted at `dir`, creating it if needed
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .map_err(|e| StoreError::Io(format!("Failed to create storage dir: {}", e)))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Write an artifact, returning its location relative to the storage dir
    pub fn put(&self, id: &str, bytes: &[u8]) -> Result<String> {
        let name = blob_file_name(id);
        let tmp = self.dir.join(format!("{}.tmp", name));
        let dest = self.dir.join(&name);

        std::fs::write(&tmp, bytes)
            .map_err(|e| StoreError::Io(format!("Failed to write artifact: {}", e)))?;
        std::fs::rename(&tmp, &dest)
            .map_err(|e| StoreError::Io(format!("Failed to finalize artifact: {}", e)))?;

        Ok(name)
    }

    /// Read an artifact by its recorded location
    pub fn read(&self, location: &str) -> Result<Vec<u8>> {
        let path = self.dir.join(location);
        std::fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(location.to_string())
            } else {
                StoreError::Io(format!("Failed to read artifact: {}", e))
            }
        })
    }

    /// Delete an artifact file. A missing file is not an error.
    pub fn remove(&self, location: &str) -> Result<()> {
        let path = self.dir.join(location);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(format!("Failed to delete artifact: {}", e))),
        }
    }
}

/// Deterministic blob file name for an id.
///
/// Filesystem-safe characters pass through; anything else is replaced and
/// the name gets a short SHA-256 suffix so distinct ids never collide.
pub fn blob_file_name(id: &str) -> String {
    let sanitized: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect();

    if !sanitized.is_empty() && sanitized == id {
        return format!("{}.html", sanitized);
    }

    let digest = format!("{:x}", Sha256::digest(id.as_bytes()));
    let short = &digest[..8];
    if sanitized.is_empty() {
        format!("{}.html", short)
    } else {
        format!("{}-{}.html", sanitized, short)
    }
}
