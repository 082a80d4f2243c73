//! CLI library components for the stain area estimator.

pub mod logging;
pub mod report;
pub mod settings;
