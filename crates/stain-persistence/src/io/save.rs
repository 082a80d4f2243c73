//! History saving operations.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use stain_model::HistoryEntry;

use crate::error::{PersistenceError, Result};

/// Save the full entry list as a JSON array.
///
/// Uses atomic write (temp file + rename) so a crash mid-write leaves the
/// previous snapshot intact.
pub fn save_history(entries: &[HistoryEntry], path: &Path) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(entries)
        .map_err(|e| PersistenceError::Serialization { source: e })?;

    let temp_path = temp_path_for(path);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    if let Err(e) = write_temp(&temp_path, &bytes) {
        discard_temp(&temp_path);
        return Err(e);
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        discard_temp(&temp_path);
        return Err(PersistenceError::AtomicWriteFailed {
            temp_path,
            target_path: path.to_path_buf(),
            source: e,
        });
    }

    tracing::info!(entries = entries.len(), "Saved history to {}", path.display());
    Ok(())
}

fn write_temp(temp_path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    file.write_all(bytes).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    file.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.to_path_buf(),
        source: e,
    })
}

/// Best-effort removal of a half-written snapshot.
fn discard_temp(temp_path: &Path) {
    match fs::remove_file(temp_path) {
        Ok(()) => tracing::debug!("Removed temp file {}", temp_path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(error = %e, "Could not remove temp file {}", temp_path.display()),
    }
}

/// Save the entry list on the blocking thread pool.
pub async fn save_history_async(entries: Vec<HistoryEntry>, path: PathBuf) -> Result<()> {
    tokio::task::spawn_blocking(move || save_history(&entries, &path))
        .await
        .map_err(|e| PersistenceError::Interrupted {
            reason: e.to_string(),
        })?
}

/// Sibling path used while a snapshot is being written.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("history.json"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_temp_path_keeps_full_name() {
        assert_eq!(
            temp_path_for(Path::new("/data/history.json")),
            PathBuf::from("/data/history.json.tmp")
        );
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");

        save_history(&[], &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "[]");
        assert!(!temp_path_for(&path).exists());
    }
}
