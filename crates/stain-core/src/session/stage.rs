//! Session stages and the transition function between them.

use std::sync::Arc;

use stain_model::{EstimationResult, PixelBuffer, SampleSet};

use crate::classifier::classify_points;
use crate::error::SessionError;
use crate::estimator::estimate_samples;
use crate::sampler::Sampler;

/// The loaded image and the file name it came from.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub file_name: String,
    pub image: Arc<PixelBuffer>,
}

/// Everything the session holds, tagged by how far the workflow has got.
///
/// An estimate only exists in [`Stage::Estimated`], next to the samples it
/// was computed from.
#[derive(Debug, Clone, Default)]
pub enum Stage {
    #[default]
    Empty,
    Loaded {
        source: SourceImage,
    },
    Sampled {
        source: SourceImage,
        samples: SampleSet,
    },
    Estimated {
        source: SourceImage,
        samples: SampleSet,
        estimate: EstimationResult,
    },
}

/// Stage discriminant without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Loaded,
    Sampled,
    Estimated,
}

/// Inputs that move the session between stages.
#[derive(Debug)]
pub enum SessionEvent {
    /// A new image replaces whatever was loaded before.
    ImageLoaded {
        file_name: String,
        image: PixelBuffer,
    },
    /// The requested number of sample points changed.
    SampleCountChanged(usize),
    /// Draw a fresh sample set with the current count.
    Resample,
    /// Compute the estimate for the held samples.
    EstimateRequested,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ImageLoaded { .. } => "image_loaded",
            Self::SampleCountChanged(_) => "sample_count_changed",
            Self::Resample => "resample",
            Self::EstimateRequested => "estimate_requested",
        }
    }
}

impl Stage {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Empty => Phase::Empty,
            Self::Loaded { .. } => Phase::Loaded,
            Self::Sampled { .. } => Phase::Sampled,
            Self::Estimated { .. } => Phase::Estimated,
        }
    }

    pub fn source(&self) -> Option<&SourceImage> {
        match self {
            Self::Empty => None,
            Self::Loaded { source }
            | Self::Sampled { source, .. }
            | Self::Estimated { source, .. } => Some(source),
        }
    }

    pub fn samples(&self) -> Option<&SampleSet> {
        match self {
            Self::Sampled { samples, .. } | Self::Estimated { samples, .. } => Some(samples),
            _ => None,
        }
    }

    pub fn estimate(&self) -> Option<&EstimationResult> {
        match self {
            Self::Estimated { estimate, .. } => Some(estimate),
            _ => None,
        }
    }

    /// Compute the stage that follows `event`.
    ///
    /// `self` is never modified; on error the caller keeps the current
    /// stage. `requested` is the sample count in effect before the event.
    pub fn next(
        &self,
        event: SessionEvent,
        sampler: &mut Sampler,
        requested: usize,
    ) -> Result<Stage, SessionError> {
        match event {
            SessionEvent::ImageLoaded { file_name, image } => Ok(Stage::Loaded {
                source: SourceImage {
                    file_name,
                    image: Arc::new(image),
                },
            }),
            SessionEvent::SampleCountChanged(count) => match self {
                Self::Empty => Ok(Self::Empty),
                Self::Loaded { source } | Self::Sampled { source, .. } => {
                    Ok(sampled(source, sampler, count))
                }
                Self::Estimated { source, .. } => {
                    let fresh = sampled(source, sampler, count);
                    if count == 0 {
                        // Nothing to estimate from; drop back to Sampled
                        // rather than keep the superseded estimate.
                        Ok(fresh)
                    } else {
                        fresh.estimated()
                    }
                }
            },
            SessionEvent::Resample => {
                let source = self.source().ok_or(SessionError::NoImage)?;
                Ok(sampled(source, sampler, requested))
            }
            SessionEvent::EstimateRequested => match self {
                Self::Empty => Err(SessionError::NoImage),
                Self::Loaded { source } => sampled(source, sampler, requested).estimated(),
                Self::Sampled { .. } | Self::Estimated { .. } => self.estimated(),
            },
        }
    }

    /// `Estimated` stage built from the samples held by this stage.
    fn estimated(&self) -> Result<Stage, SessionError> {
        let (source, samples) = match self {
            Self::Sampled { source, samples } | Self::Estimated { source, samples, .. } => {
                (source, samples)
            }
            Self::Empty | Self::Loaded { .. } => return Err(SessionError::NoImage),
        };
        let estimate = estimate_samples(&source.image, samples)?;
        Ok(Self::Estimated {
            source: source.clone(),
            samples: samples.clone(),
            estimate,
        })
    }

    /// Attach an estimate computed elsewhere for the held samples.
    ///
    /// Returns `None` when the estimate does not match the held samples.
    pub(crate) fn with_estimate(&self, estimate: EstimationResult) -> Option<Stage> {
        let (source, samples) = match self {
            Self::Sampled { source, samples } | Self::Estimated { source, samples, .. } => {
                (source, samples)
            }
            Self::Empty | Self::Loaded { .. } => return None,
        };
        if samples.len() != estimate.total_points || samples.inside_count() != estimate.points_in_stain
        {
            return None;
        }
        Some(Self::Estimated {
            source: source.clone(),
            samples: samples.clone(),
            estimate,
        })
    }
}

fn sampled(source: &SourceImage, sampler: &mut Sampler, count: usize) -> Stage {
    let generated = sampler.generate(&source.image, count);
    let samples = classify_points(&source.image, generated);
    Stage::Sampled {
        source: source.clone(),
        samples,
    }
}
