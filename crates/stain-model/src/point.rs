use serde::{Deserialize, Serialize};

/// A sample location in image space.
///
/// Coordinates are real-valued; the pixel a point falls in is found by
/// flooring both coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Integer pixel indices of this point (floor of each coordinate).
    ///
    /// Returned as signed values so that out-of-range points stay
    /// representable and can be rejected by the caller.
    pub fn pixel(&self) -> (i64, i64) {
        (self.x.floor() as i64, self.y.floor() as i64)
    }

    /// Whether two points land on the same pixel.
    pub fn same_pixel(&self, other: &Point) -> bool {
        self.pixel() == other.pixel()
    }
}
