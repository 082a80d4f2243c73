use serde::{Deserialize, Serialize};

/// Outcome of one Monte Carlo estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    /// Number of points sampled (N).
    pub total_points: usize,
    /// Number of points classified as inside the stain (k).
    pub points_in_stain: usize,
    /// `width * height * k / N`, rounded to the nearest integer.
    pub estimated_area: u64,
    /// `100 * k / N`, rounded to two decimals.
    pub area_percentage: f64,
}

impl EstimationResult {
    pub fn points_outside(&self) -> usize {
        self.total_points - self.points_in_stain
    }
}
