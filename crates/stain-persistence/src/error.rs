//! Persistence error types.
//!
//! All history operations return structured errors that provide
//! user-friendly messages and optional remediation hints.

use std::path::PathBuf;
use thiserror::Error;

/// History persistence error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The history file exists but does not hold a JSON array of entries.
    #[error("History file is corrupted: {path}")]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization error.
    #[error("Failed to serialize history")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A background task did not complete.
    #[error("History task did not complete: {reason}")]
    Interrupted { reason: String },

    /// No platform data directory could be determined.
    #[error("Could not determine a data directory for the history file")]
    NoDataDir,
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::Corrupted { path, .. } => {
                format!(
                    "The history file at {} could not be read. It may be corrupted.",
                    path.display()
                )
            }
            Self::Serialization { .. } => {
                "An error occurred while saving the calculation history.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the history to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::Interrupted { .. } => "The history operation was interrupted.".to_string(),
            Self::NoDataDir => "No location is available to store the history.".to_string(),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::Corrupted { .. } => {
                Some("Clear the history or restore the file from a backup.".into())
            }
            Self::Serialization { .. } | Self::Interrupted { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or choose a different history file.".into())
            }
            Self::NoDataDir => Some("Pass --history-file to choose a location.".into()),
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_and_write_suggestions_differ() {
        let read = PersistenceError::Io {
            operation: "read",
            path: PathBuf::from("history.json"),
            source: std::io::Error::other("denied"),
        };
        let write = PersistenceError::Io {
            operation: "write",
            path: PathBuf::from("history.json"),
            source: std::io::Error::other("denied"),
        };
        assert_ne!(read.suggestion(), write.suggestion());
        assert_eq!(
            read.user_message(),
            "Could not read the file at history.json"
        );
    }
}
