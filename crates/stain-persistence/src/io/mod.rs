//! File I/O operations for the history file.
//!
//! This module handles:
//! - Saving the whole entry list with atomic writes
//! - Loading the entry list, treating a missing file as empty history

mod load;
mod save;

pub use load::{load_history, load_history_async};
pub use save::{save_history, save_history_async, temp_path_for};
