//! The calculation history, most recent first.

use std::path::{Path, PathBuf};

use stain_model::HistoryEntry;

use crate::error::Result;
use crate::io::{load_history, load_history_async, save_history};

/// In-memory history backed by a JSON snapshot file.
///
/// The in-memory list is authoritative for the lifetime of the process.
/// Every mutation rewrites the whole snapshot; if that write fails the
/// mutation still stands in memory and the error is returned.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Open the history at `path`.
    ///
    /// A missing file gives an empty history. An unreadable or corrupted
    /// file is logged and also gives an empty history.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_history(&path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Starting with empty history: {}", e.user_message());
            Vec::new()
        });
        Self { path, entries }
    }

    /// [`HistoryStore::open`] with the read on the blocking thread pool.
    pub async fn open_async(path: PathBuf) -> Self {
        let entries = load_history_async(path.clone())
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Starting with empty history: {}", e.user_message());
                Vec::new()
            });
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries in display order, newest first.
    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entry at the front and persist.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<()> {
        tracing::debug!(id = %entry.id, "Appending history entry");
        self.entries.insert(0, entry);
        self.persist()
    }

    /// Remove the entry with `id`.
    ///
    /// Returns `Ok(false)` without touching the file when no entry matches.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return Ok(false);
        }
        tracing::debug!(id, "Removed history entry");
        self.persist()?;
        Ok(true)
    }

    /// Remove every entry.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        save_history(&self.entries, &self.path).inspect_err(|e| {
            tracing::error!(error = %e, "Failed to persist history");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stain_model::EstimationResult;
    use tempfile::tempdir;

    fn entry(name: &str) -> HistoryEntry {
        let result = EstimationResult {
            total_points: 10,
            points_in_stain: 4,
            estimated_area: 40,
            area_percentage: 40.0,
        };
        HistoryEntry::new(name, 10, 10, &result, "data:image/png;base64,".to_string())
    }

    #[test]
    fn test_append_prepends() {
        let dir = tempdir().unwrap();
        let mut store = HistoryStore::open(dir.path().join("history.json"));

        let first = entry("first.png");
        let second = entry("second.png");
        store.append(first.clone()).unwrap();
        store.append(second.clone()).unwrap();

        assert_eq!(store.all(), &[second, first]);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        let mut store = HistoryStore::open(&path);

        assert!(!store.remove("nope").unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_get_finds_by_id() {
        let dir = tempdir().unwrap();
        let mut store = HistoryStore::open(dir.path().join("history.json"));
        let e = entry("a.png");
        let id = e.id.clone();
        store.append(e).unwrap();

        assert_eq!(store.get(&id).map(|e| e.file_name.as_str()), Some("a.png"));
        assert!(store.get("other").is_none());
    }
}
