//! Monte Carlo stain area estimation.
//!
//! Random points are scattered uniformly over a binarized image. Each point
//! is classified as inside the stain when the pixel under it is bright, and
//! the stain area is the inside fraction scaled by the image area.
//!
//! # Example
//!
//! ```ignore
//! use stain_core::{PngPreviewEncoder, Sampler, Session, load_image_file};
//!
//! let (name, image) = load_image_file(Path::new("stain.png"))?;
//! let mut session = Session::with_sampler(Sampler::seeded(7));
//! session.open_image(name, image)?;
//! session.set_sample_count(5000)?;
//! let result = session.run_estimate()?;
//! let entry = session.commit(&PngPreviewEncoder::default())?;
//! ```
//!
//! # Architecture
//!
//! - `loader` - decoding image files into pixel buffers
//! - `sampler` - uniform random points with an injectable generator
//! - `classifier` - brightness test for a single point
//! - `estimator` - area and percentage from the point counts
//! - `preview` - downscaled PNG data URLs for history entries
//! - `overlay` - sample points exported for an external renderer
//! - `session` - the stage machine tying it all together

pub mod classifier;
pub mod error;
pub mod estimator;
pub mod loader;
pub mod overlay;
pub mod preview;
pub mod sampler;
pub mod session;

pub use classifier::{BRIGHTNESS_THRESHOLD, brightness, classify, classify_points};
pub use error::{EstimateError, LoadError, PreviewError, SessionError};
pub use estimator::{estimate, estimate_samples};
pub use loader::{
    ImageSource, decode_image, decode_image_async, load_image_file, load_image_file_async,
    read_image_file,
};
pub use overlay::OverlayPoints;
pub use preview::{DEFAULT_PREVIEW_SIZE, PngPreviewEncoder, PreviewEncoder, preview_dimensions};
pub use sampler::{Sampler, sample_points};
pub use session::{
    DEFAULT_SAMPLE_COUNT, EstimateJob, EstimateOutcome, Operation, Phase, Session, SessionEvent,
    SourceImage, Stage, Ticket,
};
