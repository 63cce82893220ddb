//! # Curate Reliability
//!
//! Estimates how trustworthy a human evaluator is from their verified
//! history, and turns an unverified judgement from that evaluator into a
//! probability that the item is actually correct.
//!
//! Each evaluator has a [`ConfusionProfile`] of four counters. Verified
//! outcomes go in through [`ReliabilityClassifier::update`]; unverified
//! judgements are scored by [`ReliabilityClassifier::infer_probability`]
//! using smoothed Bayes with the prior from [`ReliabilityConfig`].
//!
//! ```
//! use reliability::ReliabilityClassifier;
//!
//! let classifier = ReliabilityClassifier::default();
//! assert_eq!(classifier.infer_probability("alice", true), 0.5);
//!
//! for _ in 0..20 {
//!     classifier.update("alice", true, true);
//!     classifier.update("alice", false, false);
//! }
//! assert!(classifier.infer_probability("alice", true) > 0.9);
//! ```
pub mod config;
pub mod profile;

pub use crate::config::{ReliabilityConfig, ReliabilityError};
pub use crate::profile::ConfusionProfile;

use dashmap::DashMap;
use tracing::{debug, trace};

/// Concurrent map of evaluator id to confusion profile.
///
/// Profiles are created on first update and live until [`reset`](Self::reset).
/// Operations on one evaluator serialize on the map shard that holds it.
#[derive(Debug)]
pub struct ReliabilityClassifier {
    config: ReliabilityConfig,
    profiles: DashMap<String, ConfusionProfile>,
}

impl ReliabilityClassifier {
    pub fn new(config: ReliabilityConfig) -> Result<Self, ReliabilityError> {
        config.validate()?;
        Ok(Self {
            config,
            profiles: DashMap::new(),
        })
    }

    pub fn config(&self) -> &ReliabilityConfig {
        &self.config
    }

    /// Record a verified evaluation for `evaluator_id`.
    pub fn update(&self, evaluator_id: &str, reported: bool, actual: bool) {
        let mut entry = self.profiles.entry(evaluator_id.to_owned()).or_default();
        entry.record(reported, actual);
        trace!(evaluator_id, reported, actual, total = entry.total(), "profile updated");
    }

    /// Probability that an item is correct given `evaluator_id` reported
    /// `reported`. Evaluators without history get `unknown_probability`.
    pub fn infer_probability(&self, evaluator_id: &str, reported: bool) -> f64 {
        let Some(profile) = self.profiles.get(evaluator_id) else {
            debug!(evaluator_id, "no profile, using uninformative probability");
            return self.config.unknown_probability;
        };
        profile.posterior(reported, self.config.smoothing, self.config.prior_correct)
    }

    /// Snapshot of the counters for `evaluator_id`.
    pub fn profile(&self, evaluator_id: &str) -> Option<ConfusionProfile> {
        self.profiles.get(evaluator_id).map(|p| *p)
    }

    /// Number of evaluators with a profile.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Drop every profile.
    pub fn reset(&self) {
        self.profiles.clear();
    }
}

impl Default for ReliabilityClassifier {
    fn default() -> Self {
        Self {
            config: ReliabilityConfig::default(),
            profiles: DashMap::new(),
        }
    }
}
