//! Durable calculation history for stain area estimates.
//!
//! Committed estimates are kept most recent first and written to a single
//! JSON file after every change.
//!
//! # Features
//!
//! - **Atomic writes**: the whole list is written to a temp file and renamed
//!   over the previous snapshot
//! - **Corruption tolerance**: a malformed history file is logged and the
//!   store starts empty instead of failing
//!
//! # File Format
//!
//! A JSON array of [`stain_model::HistoryEntry`] objects with camelCase keys:
//!
//! ```text
//! [
//!   {
//!     "id": "1f0c...",
//!     "fileName": "stain.png",
//!     "imageWidth": 640,
//!     "imageHeight": 480,
//!     "totalPoints": 1000,
//!     "pointsInStain": 532,
//!     "estimatedArea": 163430,
//!     "areaPercentage": 53.2,
//!     "timestamp": "2024-06-10T06:13:20Z",
//!     "imageDataUrl": "data:image/png;base64,..."
//!   }
//! ]
//! ```
//!
//! # Example
//!
//! ```ignore
//! use stain_persistence::{HistoryStore, default_history_path};
//!
//! let mut store = HistoryStore::open(default_history_path()?);
//! store.append(entry)?;
//! for entry in store.all() {
//!     println!("{} {}", entry.file_name, entry.area_string());
//! }
//! ```

mod error;
mod io;
mod paths;
mod store;

pub use error::{PersistenceError, Result};
pub use io::{load_history, load_history_async, save_history, save_history_async, temp_path_for};
pub use paths::{HISTORY_FILE_NAME, default_history_path, project_dirs};
pub use store::HistoryStore;
