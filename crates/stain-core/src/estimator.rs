//! Area estimate from classified samples.

use stain_model::{EstimationResult, PixelBuffer, Point, SampleSet};

use crate::error::EstimateError;

/// Scale the inside fraction of the samples by the image area.
///
/// The result only depends on the image dimensions and the two counts, so
/// identical inputs always give identical results.
pub fn estimate(
    image: &PixelBuffer,
    generated: &[Point],
    inside: &[Point],
) -> Result<EstimationResult, EstimateError> {
    let total = generated.len();
    let hits = inside.len();
    if total == 0 {
        return Err(EstimateError::InsufficientSamples);
    }
    if hits > total {
        return Err(EstimateError::InsideExceedsGenerated {
            inside: hits,
            generated: total,
        });
    }

    let fraction = hits as f64 / total as f64;
    let estimated_area = (image.area() as f64 * fraction).round() as u64;
    let area_percentage = round_to_hundredths(fraction * 100.0);

    Ok(EstimationResult {
        total_points: total,
        points_in_stain: hits,
        estimated_area,
        area_percentage,
    })
}

/// [`estimate`] over a [`SampleSet`].
pub fn estimate_samples(
    image: &PixelBuffer,
    samples: &SampleSet,
) -> Result<EstimationResult, EstimateError> {
    estimate(image, samples.generated(), samples.inside())
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
