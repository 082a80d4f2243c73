//! Inside/outside decision for a single sample point.
//!
//! Input images are assumed to be binarized already: the stain is light,
//! the background is dark.

use stain_model::{PixelBuffer, Point, SampleSet};

/// Brightness above which a pixel belongs to the stain (midpoint of 0..=255).
pub const BRIGHTNESS_THRESHOLD: f64 = 127.0;

/// Unweighted mean of the red, green and blue channels. Alpha is ignored.
pub fn brightness(rgba: [u8; 4]) -> f64 {
    (f64::from(rgba[0]) + f64::from(rgba[1]) + f64::from(rgba[2])) / 3.0
}

/// Whether `point` lies on a stain pixel.
///
/// Points that floor to a pixel outside the image are always outside.
pub fn classify(point: &Point, image: &PixelBuffer) -> bool {
    let (x, y) = point.pixel();
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return false;
    };
    image
        .pixel(x, y)
        .is_some_and(|rgba| brightness(rgba) > BRIGHTNESS_THRESHOLD)
}

/// Classify every generated point and keep the inside ones in order.
pub fn classify_points(image: &PixelBuffer, generated: Vec<Point>) -> SampleSet {
    SampleSet::partition(generated, |p| classify(p, image))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(rgba: [u8; 4]) -> PixelBuffer {
        PixelBuffer::filled(4, 4, rgba).unwrap()
    }

    #[test]
    fn threshold_is_exclusive() {
        // (127 + 127 + 127) / 3 == 127 is not above the threshold.
        assert!(!classify(&Point::new(1.0, 1.0), &solid([127, 127, 127, 255])));
        // (128 + 127 + 127) / 3 = 127.33
        assert!(classify(&Point::new(1.0, 1.0), &solid([128, 127, 127, 255])));
    }

    #[test]
    fn alpha_is_ignored() {
        assert!(classify(&Point::new(0.0, 0.0), &solid([255, 255, 255, 0])));
        assert!(!classify(&Point::new(0.0, 0.0), &solid([0, 0, 0, 255])));
    }

    #[test]
    fn out_of_range_points_are_outside() {
        let white = solid([255, 255, 255, 255]);
        assert!(!classify(&Point::new(-0.5, 1.0), &white));
        assert!(!classify(&Point::new(1.0, -3.0), &white));
        assert!(!classify(&Point::new(4.0, 1.0), &white));
        assert!(!classify(&Point::new(1.0, 4.2), &white));
        assert!(classify(&Point::new(3.999, 3.999), &white));
    }

    #[test]
    fn uses_floor_of_coordinates() {
        let image = PixelBuffer::from_fn(2, 1, |x, _| {
            if x == 0 { [255, 255, 255, 255] } else { [0, 0, 0, 255] }
        })
        .unwrap();
        assert!(classify(&Point::new(0.99, 0.5), &image));
        assert!(!classify(&Point::new(1.0, 0.5), &image));
    }

    #[test]
    fn brightness_is_channel_mean() {
        assert_eq!(brightness([30, 60, 90, 0]), 60.0);
        assert_eq!(brightness([255, 255, 255, 255]), 255.0);
    }

    #[test]
    fn classify_points_keeps_order() {
        let image = PixelBuffer::from_fn(2, 1, |x, _| {
            if x == 0 { [255, 255, 255, 255] } else { [0, 0, 0, 255] }
        })
        .unwrap();
        let generated = vec![
            Point::new(0.1, 0.0),
            Point::new(1.5, 0.0),
            Point::new(0.7, 0.9),
        ];
        let set = classify_points(&image, generated);
        assert_eq!(set.len(), 3);
        assert_eq!(set.inside(), &[Point::new(0.1, 0.0), Point::new(0.7, 0.9)]);
    }
}
