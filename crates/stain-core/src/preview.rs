//! Small PNG previews stored alongside history entries.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage, imageops};
use stain_model::PixelBuffer;

use crate::error::PreviewError;

/// Default bounding box for previews, in pixels per side.
pub const DEFAULT_PREVIEW_SIZE: u32 = 100;

/// Produces the compact image encoding stored in a history entry.
pub trait PreviewEncoder {
    fn encode(&self, image: &PixelBuffer) -> Result<String, PreviewError>;
}

/// Encodes a downscaled PNG as a `data:image/png;base64,` URL.
#[derive(Debug, Clone, Copy)]
pub struct PngPreviewEncoder {
    max_size: u32,
}

impl PngPreviewEncoder {
    pub fn new(max_size: u32) -> Self {
        Self {
            max_size: max_size.max(1),
        }
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

impl Default for PngPreviewEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_SIZE)
    }
}

impl PreviewEncoder for PngPreviewEncoder {
    fn encode(&self, buffer: &PixelBuffer) -> Result<String, PreviewError> {
        let (width, height) = preview_dimensions(buffer.width(), buffer.height(), self.max_size);
        let source = RgbaImage::from_raw(buffer.width(), buffer.height(), buffer.as_raw().to_vec())
            .ok_or_else(|| PreviewError::Encode {
                source: image::ImageError::Parameter(image::error::ParameterError::from_kind(
                    image::error::ParameterErrorKind::DimensionMismatch,
                )),
            })?;
        let scaled = if (width, height) == (buffer.width(), buffer.height()) {
            source
        } else {
            imageops::thumbnail(&source, width, height)
        };

        let mut png = Cursor::new(Vec::new());
        scaled
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|e| PreviewError::Encode { source: e })?;
        Ok(format!(
            "data:image/png;base64,{}",
            STANDARD.encode(png.into_inner())
        ))
    }
}

/// Size that fits inside `max_size` x `max_size` with the aspect ratio kept.
///
/// Images already inside the box keep their size. Each side is at least 1.
pub fn preview_dimensions(width: u32, height: u32, max_size: u32) -> (u32, u32) {
    if width <= max_size && height <= max_size {
        return (width, height);
    }
    let scale = f64::from(max_size) / f64::from(width.max(height));
    let scaled = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, max_size);
    (scaled(width), scaled(height))
}
