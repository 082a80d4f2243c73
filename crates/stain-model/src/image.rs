//! Decoded raster image held in memory.

use crate::error::{ModelError, Result};

/// Bytes per pixel in the normalized RGBA8 layout.
pub const CHANNELS: usize = 4;

/// An immutable, fully materialized RGBA8 image.
///
/// Pixels are stored row-major, four bytes per pixel. A buffer always has a
/// non-zero width and height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ModelError::EmptyImage { width, height });
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(ModelError::BufferSizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;
        if data.len() != expected {
            return Err(ModelError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer where every pixel has the given RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        let len = (width as usize) * (height as usize);
        let data = rgba.repeat(len);
        Self::from_rgba8(width, height, data)
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 4]) -> Result<Self> {
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self::from_rgba8(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bounding-box area in pixels.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// RGBA value at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y as usize) * (self.width as usize) + (x as usize)) * CHANNELS;
        let px = &self.data[offset..offset + CHANNELS];
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(
            PixelBuffer::from_rgba8(0, 5, Vec::new()),
            Err(ModelError::EmptyImage {
                width: 0,
                height: 5
            })
        );
        assert!(PixelBuffer::filled(4, 0, [0, 0, 0, 255]).is_err());
    }

    #[test]
    fn rejects_short_buffer() {
        let err = PixelBuffer::from_rgba8(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            ModelError::BufferSizeMismatch {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn pixel_reads_row_major() {
        let image = PixelBuffer::from_fn(3, 2, |x, y| [x as u8, y as u8, 7, 255]).unwrap();
        assert_eq!(image.pixel(2, 1), Some([2, 1, 7, 255]));
        assert_eq!(image.pixel(0, 0), Some([0, 0, 7, 255]));
        assert_eq!(image.pixel(3, 0), None);
        assert_eq!(image.pixel(0, 2), None);
        assert_eq!(image.area(), 6);
    }
}
