//! Configuration for reliability inference.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smoothing and prior settings for [`crate::ReliabilityClassifier`].
///
/// The defaults give add-one smoothing on every counter, a flat prior on the
/// item being correct and 0.5 for evaluators that have never been observed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliabilityConfig {
    /// Pseudo-count added to each of the four confusion counters.
    pub smoothing: f64,
    /// Prior probability that an item is actually correct.
    pub prior_correct: f64,
    /// Returned for evaluators without a profile.
    pub unknown_probability: f64,
}

impl Default for ReliabilityConfig {
    fn default() -> Self {
        Self {
            smoothing: 1.0,
            prior_correct: 0.5,
            unknown_probability: 0.5,
        }
    }
}

impl ReliabilityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_prior_correct(mut self, prior_correct: f64) -> Self {
        self.prior_correct = prior_correct;
        self
    }

    pub fn with_unknown_probability(mut self, unknown_probability: f64) -> Self {
        self.unknown_probability = unknown_probability;
        self
    }

    /// Smoothing must be strictly positive so no rate is ever 0/0; both
    /// probabilities must lie in `(0, 1)` and `[0, 1]` respectively.
    pub fn validate(&self) -> Result<(), ReliabilityError> {
        if !self.smoothing.is_finite() || self.smoothing <= 0.0 {
            return Err(ReliabilityError::InvalidSmoothing(self.smoothing));
        }
        if !(self.prior_correct > 0.0 && self.prior_correct < 1.0) {
            return Err(ReliabilityError::InvalidPrior(self.prior_correct));
        }
        if !(0.0..=1.0).contains(&self.unknown_probability) {
            return Err(ReliabilityError::InvalidUnknownProbability(
                self.unknown_probability,
            ));
        }
        Ok(())
    }
}

/// Errors raised when building a classifier.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReliabilityError {
    #[error("smoothing must be a positive finite number, got {0}")]
    InvalidSmoothing(f64),
    #[error("prior_correct must be in (0, 1), got {0}")]
    InvalidPrior(f64),
    #[error("unknown_probability must be in [0, 1], got {0}")]
    InvalidUnknownProbability(f64),
}
