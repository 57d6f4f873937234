//! Display models for table/JSON output

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tabled::Tabled;

use crate::store::CacheEntry;

/// Cached game row for `gameforge list`
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct EntryDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub label: String,

    #[tabled(rename = "SIZE")]
    pub size: String,

    #[tabled(rename = "MODEL")]
    pub produced_by: String,

    #[tabled(rename = "CREATED")]
    pub created_at: String,

    #[tabled(rename = "LAST ACCESS")]
    pub last_accessed_at: String,
}

impl EntryDisplay {
    pub fn from_entry(id: &str, entry: &CacheEntry) -> Self {
        Self {
            id: id.to_string(),
            label: entry.label.clone(),
            size: format_size(entry.size_bytes),
            produced_by: entry.produced_by.clone(),
            created_at: format_local(entry.created_at),
            last_accessed_at: format_local(entry.last_accessed_at),
        }
    }
}

/// Model candidate row for `gameforge models`
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ModelDisplay {
    #[tabled(rename = "PRIORITY")]
    pub priority: usize,

    #[tabled(rename = "MODEL")]
    pub model: String,
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

fn format_local(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_entry_display_carries_metadata() {
        let entry = CacheEntry::new("g-1.html".to_string(), 2048, "gemini-pro", "My Game");
        let row = EntryDisplay::from_entry("g-1", &entry);

        assert_eq!(row.id, "g-1");
        assert_eq!(row.label, "My Game");
        assert_eq!(row.produced_by, "gemini-pro");
        assert_eq!(row.size, "2.0 KB");
    }
}
