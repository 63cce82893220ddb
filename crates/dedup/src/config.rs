//! Configuration and error types for MinHash deduplication.
//!
//! Everything here is plain data. The signature function is a pure function
//! of `(text, config)`; only [`crate::Deduplicator`] carries state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of hash functions (signature slots).
pub const DEFAULT_NUM_HASHES: usize = 100;

/// Default similarity at or above which a text counts as a duplicate.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// How the signature store is locked during an evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockPolicy {
    /// Scan under a read lock, then append under a separate write lock.
    ///
    /// Two near-identical texts evaluated at the same moment may both be
    /// accepted, because neither sees the other's signature during its scan.
    #[default]
    Optimistic,
    /// Hold one write lock across scan and append. Evaluations are fully
    /// serialized, so at most one of a group of near-duplicates is accepted.
    Serialized,
}

/// 32-bit hash applied to each token before slot mixing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashKind {
    /// FNV-1a with the seed folded into the offset basis. Seed 0 is plain
    /// FNV-1a.
    #[default]
    Fnv1a,
    /// xxHash32 seeded with `seed`.
    Xxh32,
}

/// Configuration for signature computation and duplicate detection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MinHashConfig {
    /// Number of hash functions, i.e. the signature length.
    pub num_hashes: usize,
    /// Seed for the per-token 32-bit hash.
    ///
    /// Signatures are only comparable when produced with the same seed and
    /// the same `num_hashes`.
    pub seed: u32,
    /// Token hash function.
    pub hash_kind: HashKind,
    /// Similarity threshold used when a call does not supply its own.
    pub threshold: f64,
    /// Locking discipline for the shared signature store.
    pub lock_policy: LockPolicy,
    /// Compute signature slots in parallel with rayon.
    pub use_parallel: bool,
}

impl MinHashConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the signature length.
    pub fn with_num_hashes(mut self, num_hashes: usize) -> Self {
        self.num_hashes = num_hashes;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_hash_kind(mut self, hash_kind: HashKind) -> Self {
        self.hash_kind = hash_kind;
        self
    }

    /// Set the default duplicate threshold in `[0, 1]`.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_lock_policy(mut self, lock_policy: LockPolicy) -> Self {
        self.lock_policy = lock_policy;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), MinHashConfigError> {
        if self.num_hashes == 0 {
            return Err(MinHashConfigError::InvalidNumHashes {
                num_hashes: self.num_hashes,
            });
        }
        validate_threshold(self.threshold)
    }
}

impl Default for MinHashConfig {
    fn default() -> Self {
        Self {
            num_hashes: DEFAULT_NUM_HASHES,
            seed: 0,
            hash_kind: HashKind::Fnv1a,
            threshold: DEFAULT_THRESHOLD,
            lock_policy: LockPolicy::Optimistic,
            use_parallel: false,
        }
    }
}

/// Check that a similarity threshold is a finite value in `[0, 1]`.
pub fn validate_threshold(threshold: f64) -> Result<(), MinHashConfigError> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(MinHashConfigError::InvalidThreshold { threshold });
    }
    Ok(())
}

/// Errors raised by invalid deduplication configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MinHashConfigError {
    #[error("invalid num_hashes {num_hashes}; must be >= 1")]
    InvalidNumHashes { num_hashes: usize },
    #[error("invalid threshold {threshold}; must be within [0, 1]")]
    InvalidThreshold { threshold: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = MinHashConfig::default();
        assert_eq!(cfg.num_hashes, 100);
        assert_eq!(cfg.threshold, 0.8);
        assert_eq!(cfg.lock_policy, LockPolicy::Optimistic);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_hashes_rejected() {
        let cfg = MinHashConfig::new().with_num_hashes(0);
        assert_eq!(
            cfg.validate(),
            Err(MinHashConfigError::InvalidNumHashes { num_hashes: 0 })
        );
    }

    #[test]
    fn threshold_out_of_range_rejected() {
        assert!(MinHashConfig::new().with_threshold(1.5).validate().is_err());
        assert!(MinHashConfig::new().with_threshold(-0.1).validate().is_err());
        assert!(MinHashConfig::new()
            .with_threshold(f64::NAN)
            .validate()
            .is_err());
        assert!(MinHashConfig::new().with_threshold(1.0).validate().is_ok());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: MinHashConfig =
            serde_json::from_str(r#"{"threshold": 0.9, "lock_policy": "serialized"}"#).unwrap();
        assert_eq!(cfg.threshold, 0.9);
        assert_eq!(cfg.num_hashes, DEFAULT_NUM_HASHES);
        assert_eq!(cfg.lock_policy, LockPolicy::Serialized);
        assert_eq!(cfg.hash_kind, HashKind::Fnv1a);
    }

    #[test]
    fn hash_kind_parses_snake_case() {
        let cfg: MinHashConfig = serde_json::from_str(r#"{"hash_kind": "xxh32"}"#).unwrap();
        assert_eq!(cfg.hash_kind, HashKind::Xxh32);
    }
}
