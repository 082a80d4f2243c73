//! Platform locations for application files.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{PersistenceError, Result};

/// File name of the history snapshot inside the data directory.
pub const HISTORY_FILE_NAME: &str = "history.json";

/// Per-user directories for this application.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "StainArea", "stain-area")
}

/// Default history file location: `<data dir>/history.json`.
pub fn default_history_path() -> Result<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(HISTORY_FILE_NAME))
        .ok_or(PersistenceError::NoDataDir)
}
