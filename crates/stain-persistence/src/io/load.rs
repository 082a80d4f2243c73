//! History loading operations.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use stain_model::HistoryEntry;

use crate::error::{PersistenceError, Result};

/// Load the entry list from a history file.
///
/// A missing file is an empty history. Anything else that cannot be read
/// or parsed is an error; the store decides how to recover.
pub fn load_history(path: &Path) -> Result<Vec<HistoryEntry>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No history file at {}", path.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(PersistenceError::Io {
                operation: "read",
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let entries: Vec<HistoryEntry> =
        serde_json::from_slice(&bytes).map_err(|e| PersistenceError::Corrupted {
            path: path.to_path_buf(),
            source: e,
        })?;

    tracing::info!(entries = entries.len(), "Loaded history from {}", path.display());
    Ok(entries)
}

/// Load the entry list on the blocking thread pool.
pub async fn load_history_async(path: PathBuf) -> Result<Vec<HistoryEntry>> {
    tokio::task::spawn_blocking(move || load_history(&path))
        .await
        .map_err(|e| PersistenceError::Interrupted {
            reason: e.to_string(),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty_history() {
        let dir = tempdir().unwrap();
        let entries = load_history(&dir.path().join("history.json")).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_malformed_file_is_corrupted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_history(&path).unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupted { .. }));
    }

    #[test]
    fn test_wrong_shape_is_corrupted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, r#"{"id": "1"}"#).unwrap();

        assert!(matches!(
            load_history(&path),
            Err(PersistenceError::Corrupted { .. })
        ));
    }
}
