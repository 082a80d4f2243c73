//! The single mutable aggregate of an estimation workflow.
//!
//! A [`Session`] owns the loaded image, the requested sample count, the
//! current sample set and the estimate derived from it. All changes go
//! through [`Stage::next`]; the new stage is only stored when the whole
//! transition succeeded, so a failed call leaves the session untouched.
//!
//! # Long-running operations
//!
//! Loading and estimating can run off the caller's thread. They follow a
//! begin/finish protocol:
//!
//! ```ignore
//! let ticket = session.begin_load()?;
//! let outcome = load_image_file_async(path).await;
//! session.finish_load(ticket, outcome)?;
//! ```
//!
//! While an operation is in flight every other mutation is rejected with
//! [`SessionError::Busy`]. [`Session::reset`] is always allowed and makes
//! any outstanding ticket stale: finishing it returns `Ok(None)` and changes
//! nothing.

mod job;
mod stage;

use std::path::PathBuf;
use std::sync::Arc;

use stain_model::{EstimationResult, HistoryEntry, PixelBuffer, SampleSet};
use tracing::{debug, info};

pub use job::{EstimateJob, EstimateOutcome, Operation, Ticket};
pub use stage::{Phase, SessionEvent, SourceImage, Stage};

use crate::error::{LoadError, SessionError};
use crate::loader::load_image_file_async;
use crate::overlay::OverlayPoints;
use crate::preview::PreviewEncoder;
use crate::sampler::Sampler;

/// Sample count used until the user picks another one.
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

#[derive(Debug)]
pub struct Session {
    stage: Stage,
    requested_points: usize,
    sampler: Sampler,
    in_flight: Option<Operation>,
    generation: u64,
    /// Sampled stage drawn by a ticketed estimate from `Loaded`. Installed
    /// only when that estimate succeeds.
    staged: Option<Stage>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Session backed by an entropy-seeded sampler.
    pub fn new() -> Self {
        Self::with_sampler(Sampler::from_entropy())
    }

    pub fn with_sampler(sampler: Sampler) -> Self {
        Self {
            stage: Stage::Empty,
            requested_points: DEFAULT_SAMPLE_COUNT,
            sampler,
            in_flight: None,
            generation: 0,
            staged: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn phase(&self) -> Phase {
        self.stage.phase()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn requested_points(&self) -> usize {
        self.requested_points
    }

    pub fn image(&self) -> Option<&PixelBuffer> {
        self.stage.source().map(|s| s.image.as_ref())
    }

    pub fn file_name(&self) -> Option<&str> {
        self.stage.source().map(|s| s.file_name.as_str())
    }

    pub fn samples(&self) -> Option<&SampleSet> {
        self.stage.samples()
    }

    /// The current estimate; only present in [`Phase::Estimated`].
    pub fn estimate(&self) -> Option<&EstimationResult> {
        self.stage.estimate()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<Operation> {
        self.in_flight
    }

    /// Points for an overlay renderer, once samples exist.
    pub fn overlay(&self) -> Option<OverlayPoints> {
        let source = self.stage.source()?;
        let samples = self.stage.samples()?;
        Some(OverlayPoints::new(&source.image, samples))
    }

    // ========================================================================
    // Synchronous transitions
    // ========================================================================

    /// Apply one event.
    pub fn apply(&mut self, event: SessionEvent) -> Result<Phase, SessionError> {
        self.ensure_idle()?;
        self.transition(event)
    }

    /// Replace the image. Ends in [`Phase::Loaded`].
    pub fn load_image(
        &mut self,
        file_name: impl Into<String>,
        image: PixelBuffer,
    ) -> Result<Phase, SessionError> {
        self.apply(SessionEvent::ImageLoaded {
            file_name: file_name.into(),
            image,
        })
    }

    /// Replace the image and draw the first sample set right away.
    pub fn open_image(
        &mut self,
        file_name: impl Into<String>,
        image: PixelBuffer,
    ) -> Result<Phase, SessionError> {
        self.ensure_idle()?;
        self.open(file_name.into(), image)
    }

    pub fn set_sample_count(&mut self, count: usize) -> Result<Phase, SessionError> {
        self.apply(SessionEvent::SampleCountChanged(count))
    }

    pub fn resample(&mut self) -> Result<Phase, SessionError> {
        self.apply(SessionEvent::Resample)
    }

    /// Estimate from the held samples and return the result.
    pub fn run_estimate(&mut self) -> Result<EstimationResult, SessionError> {
        self.apply(SessionEvent::EstimateRequested)?;
        self.stage
            .estimate()
            .copied()
            .ok_or(SessionError::NotEstimated)
    }

    /// Return to the initial empty state, abandoning in-flight work.
    pub fn reset(&mut self) {
        if let Some(operation) = self.in_flight {
            debug!(%operation, "reset abandons in-flight operation");
        }
        self.stage = Stage::Empty;
        self.requested_points = DEFAULT_SAMPLE_COUNT;
        self.in_flight = None;
        self.staged = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Build a history entry for the current estimate.
    ///
    /// The session itself is not changed.
    pub fn commit(&self, encoder: &dyn PreviewEncoder) -> Result<HistoryEntry, SessionError> {
        let Stage::Estimated {
            source, estimate, ..
        } = &self.stage
        else {
            return Err(SessionError::NotEstimated);
        };
        let preview = encoder.encode(&source.image)?;
        let entry = HistoryEntry::new(
            source.file_name.clone(),
            source.image.width(),
            source.image.height(),
            estimate,
            preview,
        );
        info!(id = %entry.id, file = %entry.file_name, "committed estimate");
        Ok(entry)
    }

    // ========================================================================
    // Ticketed operations
    // ========================================================================

    pub fn begin_load(&mut self) -> Result<Ticket, SessionError> {
        self.begin(Operation::Load)
    }

    /// Complete a load started with [`Session::begin_load`].
    ///
    /// On success the new image is sampled immediately. Returns `Ok(None)`
    /// when the ticket is stale.
    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        outcome: Result<(String, PixelBuffer), LoadError>,
    ) -> Result<Option<Phase>, SessionError> {
        if !self.accepts(ticket) {
            debug!(operation = %ticket.operation, "discarding stale load result");
            return Ok(None);
        }
        self.in_flight = None;
        let (file_name, image) = outcome?;
        self.open(file_name, image).map(Some)
    }

    /// Snapshot the held samples for estimation elsewhere.
    ///
    /// From [`Phase::Loaded`] a sample set is drawn first. The session keeps
    /// reporting `Loaded` until the estimate is finished successfully.
    pub fn begin_estimate(&mut self) -> Result<EstimateJob, SessionError> {
        self.ensure_idle()?;
        let staged = match self.stage {
            Stage::Loaded { .. } => Some(self.stage.next(
                SessionEvent::Resample,
                &mut self.sampler,
                self.requested_points,
            )?),
            _ => None,
        };
        let (image, samples) = match staged.as_ref().unwrap_or(&self.stage) {
            Stage::Sampled { source, samples } | Stage::Estimated { source, samples, .. } => {
                (Arc::clone(&source.image), samples.clone())
            }
            Stage::Empty | Stage::Loaded { .. } => return Err(SessionError::NoImage),
        };
        let ticket = self.begin(Operation::Estimate)?;
        self.staged = staged;
        Ok(EstimateJob::new(ticket, image, samples))
    }

    /// Complete an estimate started with [`Session::begin_estimate`].
    ///
    /// A failed estimate leaves the stage as it was before the job began.
    /// Returns `Ok(None)` when the ticket is stale or the result no longer
    /// matches the held samples.
    pub fn finish_estimate(
        &mut self,
        outcome: EstimateOutcome,
    ) -> Result<Option<Phase>, SessionError> {
        if !self.accepts(outcome.ticket) {
            debug!(operation = %outcome.ticket.operation, "discarding stale estimate");
            return Ok(None);
        }
        self.in_flight = None;
        let staged = self.staged.take();
        let estimate = outcome.result?;
        let Some(next) = staged.as_ref().unwrap_or(&self.stage).with_estimate(estimate) else {
            debug!("estimate does not match held samples; discarded");
            return Ok(None);
        };
        self.stage = next;
        info!(
            total_points = estimate.total_points,
            points_in_stain = estimate.points_in_stain,
            estimated_area = estimate.estimated_area,
            area_percentage = estimate.area_percentage,
            "estimate complete"
        );
        Ok(Some(self.phase()))
    }

    /// Load and sample a file on the blocking pool.
    pub async fn load_file_async(&mut self, path: PathBuf) -> Result<Option<Phase>, SessionError> {
        let ticket = self.begin_load()?;
        let outcome = load_image_file_async(path).await;
        self.finish_load(ticket, outcome)
    }

    /// Estimate on the blocking pool.
    pub async fn estimate_async(&mut self) -> Result<Option<Phase>, SessionError> {
        let job = self.begin_estimate()?;
        let outcome = job.run_async().await;
        self.finish_estimate(outcome)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn ensure_idle(&self) -> Result<(), SessionError> {
        match self.in_flight {
            Some(operation) => Err(SessionError::Busy { operation }),
            None => Ok(()),
        }
    }

    fn begin(&mut self, operation: Operation) -> Result<Ticket, SessionError> {
        self.ensure_idle()?;
        self.in_flight = Some(operation);
        Ok(Ticket {
            generation: self.generation,
            operation,
        })
    }

    fn accepts(&self, ticket: Ticket) -> bool {
        ticket.generation == self.generation && self.in_flight == Some(ticket.operation)
    }

    fn open(&mut self, file_name: String, image: PixelBuffer) -> Result<Phase, SessionError> {
        self.transition(SessionEvent::ImageLoaded { file_name, image })?;
        self.transition(SessionEvent::Resample)
    }

    fn transition(&mut self, event: SessionEvent) -> Result<Phase, SessionError> {
        let requested = match event {
            SessionEvent::SampleCountChanged(count) => count,
            _ => self.requested_points,
        };
        let name = event.name();
        let next = self
            .stage
            .next(event, &mut self.sampler, self.requested_points)?;
        debug!(
            event = name,
            from = ?self.stage.phase(),
            to = ?next.phase(),
            requested,
            "session transition"
        );
        self.stage = next;
        self.requested_points = requested;
        Ok(self.stage.phase())
    }
}
