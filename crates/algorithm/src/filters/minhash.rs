use std::sync::Arc;

use dedup::Deduplicator;

use crate::capability::{FilterAlgorithm, FilterDecision};
use crate::params::Params;

/// Near-duplicate filter backed by a shared [`Deduplicator`].
///
/// Accepted texts are remembered, so this filter is stateful: the second
/// submission of the same text is dropped. `minhash_threshold` overrides the
/// configured threshold without a range check, as the HTTP dedup route does.
#[derive(Debug, Clone)]
pub struct MinHashFilter {
    dedup: Arc<Deduplicator>,
}

impl MinHashFilter {
    pub const NAME: &'static str = "minhash";

    pub fn new(dedup: Arc<Deduplicator>) -> Self {
        Self { dedup }
    }

    pub fn deduplicator(&self) -> &Arc<Deduplicator> {
        &self.dedup
    }
}

impl FilterAlgorithm for MinHashFilter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, text: &str, params: &Params) -> FilterDecision {
        let verdict = self.dedup.evaluate(text, params.f64("minhash_threshold"));
        FilterDecision {
            keep: verdict.keep,
            reason: verdict.reason,
        }
    }
}
