//! # Curate Deduplication
//!
//! Near-duplicate detection for text samples using MinHash signatures. A
//! [`Deduplicator`] owns a [`SignatureStore`]; every accepted text adds its
//! signature to the store, so the corpus being deduplicated against is the
//! set of texts accepted so far.
//!
//! ## Contract
//!
//! - [`signature`] and [`jaccard_similarity`] are pure functions.
//! - [`Deduplicator::evaluate`] is stateful and order dependent: the same text
//!   submitted twice is accepted once and rejected the second time.
//! - Under [`LockPolicy::Optimistic`] (the default) the similarity scan and the
//!   append take separate locks. Two near-duplicates evaluated concurrently can
//!   both be accepted. Use [`LockPolicy::Serialized`] to rule that out.
//!
//! ## Example
//!
//! ```
//! use dedup::{Deduplicator, MinHashConfig};
//!
//! let dedup = Deduplicator::new(MinHashConfig::default()).unwrap();
//!
//! let first = dedup.evaluate("the cat sat on the mat", None);
//! assert!(first.keep);
//!
//! let second = dedup.evaluate("The cat sat on the mat", None);
//! assert!(!second.keep);
//! assert!(second.reason.starts_with("duplicate found"));
//! ```
pub mod config;
pub mod signature;
pub mod store;

pub use crate::config::{
    validate_threshold, HashKind, LockPolicy, MinHashConfig, MinHashConfigError,
    DEFAULT_NUM_HASHES, DEFAULT_THRESHOLD,
};
pub use crate::signature::{hash_token, jaccard_similarity, signature, tokenize, Signature};
pub use crate::store::SignatureStore;

use serde::Serialize;
use tracing::debug;

/// Outcome of a single deduplication check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DedupVerdict {
    /// `true` when the text was new and its signature was stored.
    pub keep: bool,
    pub reason: String,
    /// Similarity to the matching stored signature, set on rejection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl DedupVerdict {
    fn unique() -> Self {
        Self {
            keep: true,
            reason: "unique".to_string(),
            similarity: None,
        }
    }

    fn duplicate(similarity: f64) -> Self {
        Self {
            keep: false,
            reason: format!("duplicate found, similarity: {similarity:.6}"),
            similarity: Some(similarity),
        }
    }
}

/// Stateful MinHash deduplicator.
#[derive(Debug)]
pub struct Deduplicator {
    config: MinHashConfig,
    store: SignatureStore,
}

impl Deduplicator {
    /// Build a deduplicator with an empty store.
    pub fn new(config: MinHashConfig) -> Result<Self, MinHashConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            store: SignatureStore::new(),
        })
    }

    pub fn config(&self) -> &MinHashConfig {
        &self.config
    }

    pub fn store(&self) -> &SignatureStore {
        &self.store
    }

    /// Signature of `text` under this deduplicator's configuration.
    pub fn signature(&self, text: &str) -> Signature {
        signature(text, &self.config)
    }

    /// Check `text` against every accepted signature.
    ///
    /// `threshold` overrides the configured default for this call only. The
    /// override is not range-checked: above 1 nothing is a duplicate, below 0
    /// everything is once the store is non-empty. On rejection the store is
    /// left unchanged.
    pub fn evaluate(&self, text: &str, threshold: Option<f64>) -> DedupVerdict {
        let threshold = threshold.unwrap_or(self.config.threshold);
        let sig = self.signature(text);

        let verdict = match self.config.lock_policy {
            LockPolicy::Optimistic => match self.store.find_similar(&sig, threshold) {
                Some(sim) => DedupVerdict::duplicate(sim),
                None => {
                    self.store.append(sig);
                    DedupVerdict::unique()
                }
            },
            LockPolicy::Serialized => match self.store.insert_if_unique(sig, threshold) {
                Ok(()) => DedupVerdict::unique(),
                Err(sim) => DedupVerdict::duplicate(sim),
            },
        };

        debug!(
            keep = verdict.keep,
            threshold,
            stored = self.store.len(),
            "dedup evaluation"
        );
        verdict
    }

    /// Number of accepted texts.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Forget every accepted signature.
    pub fn reset(&self) {
        self.store.clear();
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self {
            config: MinHashConfig::default(),
            store: SignatureStore::new(),
        }
    }
}
