//! Tickets for operations that complete outside the session.

use std::fmt;
use std::sync::Arc;

use stain_model::{EstimationResult, PixelBuffer, SampleSet};

use crate::error::EstimateError;
use crate::estimator::estimate_samples;

/// Long-running session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Estimate,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => write!(f, "load"),
            Self::Estimate => write!(f, "estimate"),
        }
    }
}

/// Proof that an operation was started by a session.
///
/// A ticket only completes against the same session generation it was
/// issued in; a reset in between turns its result into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub(crate) generation: u64,
    pub(crate) operation: Operation,
}

impl Ticket {
    pub fn operation(&self) -> Operation {
        self.operation
    }
}

/// A snapshot of the image and samples to estimate from.
#[derive(Debug, Clone)]
pub struct EstimateJob {
    ticket: Ticket,
    image: Arc<PixelBuffer>,
    samples: SampleSet,
}

/// Result of an [`EstimateJob`], handed back to the session.
#[derive(Debug, Clone)]
pub struct EstimateOutcome {
    pub(crate) ticket: Ticket,
    pub(crate) result: Result<EstimationResult, EstimateError>,
}

impl EstimateOutcome {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn result(&self) -> &Result<EstimationResult, EstimateError> {
        &self.result
    }
}

impl EstimateJob {
    pub(crate) fn new(ticket: Ticket, image: Arc<PixelBuffer>, samples: SampleSet) -> Self {
        Self {
            ticket,
            image,
            samples,
        }
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn run(self) -> EstimateOutcome {
        let result = estimate_samples(&self.image, &self.samples);
        EstimateOutcome {
            ticket: self.ticket,
            result,
        }
    }

    /// Run on the blocking thread pool.
    pub async fn run_async(self) -> EstimateOutcome {
        let ticket = self.ticket;
        match tokio::task::spawn_blocking(move || self.run()).await {
            Ok(outcome) => outcome,
            Err(e) => EstimateOutcome {
                ticket,
                result: Err(EstimateError::Interrupted {
                    reason: e.to_string(),
                }),
            },
        }
    }
}
