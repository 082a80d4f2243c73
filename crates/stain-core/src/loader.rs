//! Image decoding into a [`PixelBuffer`].
//!
//! Decoding is delegated to the `image` crate; the result is always converted
//! to RGBA8 before it is handed out, so callers never see a buffer without
//! pixel data.

use std::path::{Path, PathBuf};

use stain_model::{ModelError, PixelBuffer};

use crate::error::LoadError;

/// Raw image bytes plus the name the user knows the file by.
#[derive(Debug, Clone)]
pub struct ImageSource {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Decode PNG, JPEG or BMP bytes.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, LoadError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| LoadError::Decode { source: e })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    let buffer = PixelBuffer::from_rgba8(width, height, rgba.into_raw()).map_err(|e| match e {
        ModelError::EmptyImage { width, height } => LoadError::EmptyImage { width, height },
        other => LoadError::Buffer { source: other },
    })?;
    tracing::debug!(width, height, "decoded image");
    Ok(buffer)
}

/// Read an image file without decoding it.
pub fn read_image_file(path: &Path) -> Result<ImageSource, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    Ok(ImageSource { file_name, bytes })
}

/// Read and decode an image file.
pub fn load_image_file(path: &Path) -> Result<(String, PixelBuffer), LoadError> {
    let source = read_image_file(path)?;
    let image = decode_image(&source.bytes)?;
    tracing::info!(
        file = %source.file_name,
        width = image.width(),
        height = image.height(),
        "loaded image"
    );
    Ok((source.file_name, image))
}

/// Decode on the blocking thread pool.
pub async fn decode_image_async(bytes: Vec<u8>) -> Result<PixelBuffer, LoadError> {
    tokio::task::spawn_blocking(move || decode_image(&bytes))
        .await
        .map_err(|e| LoadError::Interrupted {
            reason: e.to_string(),
        })?
}

/// Read and decode a file on the blocking thread pool.
pub async fn load_image_file_async(path: PathBuf) -> Result<(String, PixelBuffer), LoadError> {
    tokio::task::spawn_blocking(move || load_image_file(&path))
        .await
        .map_err(|e| LoadError::Interrupted {
            reason: e.to_string(),
        })?
}
