//! Uniform random point generation over an image.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use stain_model::{PixelBuffer, Point};

/// Generates sample points with an injectable random source.
///
/// The generator does not need to be cryptographically strong; it only has
/// to be uniform. Tests use [`Sampler::seeded`] for reproducible sequences.
pub struct Sampler {
    rng: Box<dyn RngCore + Send>,
}

impl Sampler {
    /// Seed from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(Box::new(StdRng::from_entropy()))
    }

    /// Deterministic generator for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn with_rng(rng: Box<dyn RngCore + Send>) -> Self {
        Self { rng }
    }

    /// Draw `n` fresh points uniformly over `[0, width) x [0, height)`.
    pub fn generate(&mut self, image: &PixelBuffer, n: usize) -> Vec<Point> {
        sample_points(image.width(), image.height(), n, &mut *self.rng)
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl fmt::Debug for Sampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sampler").finish_non_exhaustive()
    }
}

/// Draw `n` points with independent uniform coordinates.
pub fn sample_points<R: Rng + ?Sized>(width: u32, height: u32, n: usize, rng: &mut R) -> Vec<Point> {
    let w = f64::from(width);
    let h = f64::from(height);
    (0..n)
        .map(|_| Point::new(rng.gen_range(0.0..w), rng.gen_range(0.0..h)))
        .collect()
}
