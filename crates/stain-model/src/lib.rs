//! Data model for Monte Carlo stain area estimation.
//!
//! These are plain value types shared by the estimation engine, the history
//! store and the command-line front end. Nothing here performs I/O.

pub mod error;
pub mod estimate;
pub mod history;
pub mod image;
pub mod point;
pub mod samples;

pub use error::{ModelError, Result};
pub use estimate::EstimationResult;
pub use history::HistoryEntry;
pub use image::PixelBuffer;
pub use point::Point;
pub use samples::SampleSet;
