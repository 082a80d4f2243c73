//! Error types for loading, estimating and driving a session.
//!
//! Every failing operation returns one of these and leaves the session
//! exactly as it was before the call.

use std::path::PathBuf;

use thiserror::Error;

use crate::session::Operation;

// =========================================================================
// IMAGE LOADING
// =========================================================================

/// Failure to turn input bytes into a [`stain_model::PixelBuffer`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be read.
    #[error("Failed to read image file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Corrupt data or an unsupported format.
    #[error("Failed to decode image")]
    Decode {
        #[source]
        source: image::ImageError,
    },

    /// The image decoded but has zero width or height.
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// Decoded pixels did not form a valid buffer.
    #[error("Decoded pixel data is invalid")]
    Buffer {
        #[source]
        source: stain_model::ModelError,
    },

    /// A background load task did not complete.
    #[error("Image loading did not complete: {reason}")]
    Interrupted { reason: String },
}

// =========================================================================
// ESTIMATION
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    /// No points were generated, so no fraction can be computed.
    #[error("Cannot estimate an area from zero sample points")]
    InsufficientSamples,

    #[error("{inside} inside points exceed {generated} generated points")]
    InsideExceedsGenerated { inside: usize, generated: usize },

    /// A background estimation task did not complete.
    #[error("Estimation task did not complete: {reason}")]
    Interrupted { reason: String },
}

// =========================================================================
// PREVIEW ENCODING
// =========================================================================

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Failed to encode preview image")]
    Encode {
        #[source]
        source: image::ImageError,
    },
}

// =========================================================================
// SESSION
// =========================================================================

#[derive(Debug, Error)]
pub enum SessionError {
    /// The operation needs an image and none is loaded.
    #[error("No image is loaded")]
    NoImage,

    /// Commit was requested before an estimate exists.
    #[error("No estimate is available; run the estimation first")]
    NotEstimated,

    /// Another operation is still in flight.
    #[error("A {operation} operation is already in progress")]
    Busy { operation: Operation },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Estimate(#[from] EstimateError),

    #[error(transparent)]
    Preview(#[from] PreviewError),
}

impl SessionError {
    /// Short user-facing description of the failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::NoImage => "Load an image before sampling or estimating.".to_string(),
            Self::NotEstimated => "Calculate the area before saving it to history.".to_string(),
            Self::Busy { operation } => {
                format!("Please wait for the current {operation} to finish.")
            }
            Self::Load(LoadError::Io { path, .. }) => {
                format!("Could not read the file at {}", path.display())
            }
            Self::Load(LoadError::Decode { .. }) => {
                "The file is not a supported image (PNG, JPEG or BMP) or it is corrupted."
                    .to_string()
            }
            Self::Load(LoadError::EmptyImage { .. }) => "The image has no pixels.".to_string(),
            Self::Load(err) => err.to_string(),
            Self::Estimate(EstimateError::InsufficientSamples) => {
                "Choose at least one sample point.".to_string()
            }
            Self::Estimate(err) => err.to_string(),
            Self::Preview(_) => "Could not create the preview for the history entry.".to_string(),
        }
    }
}
