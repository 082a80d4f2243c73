//! Sample points exported for an external overlay renderer.
//!
//! Coordinates stay in image pixel space; scaling to a display surface is
//! the renderer's job.

use serde::Serialize;
use stain_model::{PixelBuffer, Point, SampleSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayPoints {
    pub image_width: u32,
    pub image_height: u32,
    pub generated_points: Vec<Point>,
    pub points_in_stain: Vec<Point>,
}

impl OverlayPoints {
    pub fn new(image: &PixelBuffer, samples: &SampleSet) -> Self {
        Self {
            image_width: image.width(),
            image_height: image.height(),
            generated_points: samples.generated().to_vec(),
            points_in_stain: samples.inside().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_native_coordinates() {
        let image = PixelBuffer::filled(640, 480, [0, 0, 0, 255]).unwrap();
        let samples = SampleSet::new(
            vec![Point::new(12.5, 400.25), Point::new(600.0, 1.0)],
            vec![Point::new(600.0, 1.0)],
        )
        .unwrap();
        let json = serde_json::to_value(OverlayPoints::new(&image, &samples)).unwrap();
        assert_eq!(json["imageWidth"], 640);
        assert_eq!(json["imageHeight"], 480);
        assert_eq!(json["generatedPoints"][0]["x"], 12.5);
        assert_eq!(json["generatedPoints"][0]["y"], 400.25);
        assert_eq!(json["pointsInStain"].as_array().map(Vec::len), Some(1));
    }
}
