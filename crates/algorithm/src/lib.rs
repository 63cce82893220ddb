//! # Curate Algorithms
//!
//! Pluggable curation algorithms and the machinery that composes them.
//!
//! ## Core types
//!
//! - [`Category`]: filter, rewrite, distill or synthetic.
//! - [`FilterAlgorithm`], [`RewriteAlgorithm`], [`DistillAlgorithm`],
//!   [`SyntheticAlgorithm`]: capability traits. Filters are synchronous; the
//!   other three are async because they may call a completion service
//!   through [`Collaborators`].
//! - [`AlgorithmRegistry`]: name lookup per category, last writer wins.
//! - [`PipelineExecutor`]: runs an ordered list of filters, stopping at the
//!   first rejection.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use algorithm::{register_builtin, AlgorithmRegistry, Params, PipelineExecutor};
//! use dedup::Deduplicator;
//!
//! let registry = Arc::new(AlgorithmRegistry::new());
//! register_builtin(&registry, Arc::new(Deduplicator::default())).unwrap();
//!
//! let executor = PipelineExecutor::new(registry);
//! let outcome = executor
//!     .run_filters("aaaaaaaaaaaa", &["entropy", "ngram"], &Params::new())
//!     .unwrap();
//!
//! assert!(!outcome.passed);
//! assert!(outcome.reason.starts_with("failed at entropy:"));
//! ```
pub mod capability;
pub mod filters;
pub mod params;
pub mod pipeline;
pub mod registry;
pub mod rewrite;

pub use crate::capability::{
    Algorithm, AlgorithmError, Category, Collaborators, DistillAlgorithm, FilterAlgorithm,
    FilterDecision, ParseCategoryError, RewriteAlgorithm, SyntheticAlgorithm,
};
pub use crate::filters::{EntropyFilter, MinHashFilter, NGramFilter, ReadabilityFilter};
pub use crate::params::Params;
pub use crate::pipeline::{
    InvokeError, PipelineError, PipelineExecutor, PipelineMetrics, PipelineOutcome,
};
pub use crate::registry::{AlgorithmRegistry, RegistryError};
pub use crate::rewrite::PiiMaskRewrite;

use std::sync::Arc;

use dedup::Deduplicator;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default thresholds for the built-in filters. Per-call [`Params`] still
/// take precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuiltinConfig {
    pub entropy_threshold: f64,
    pub ngram_n: usize,
    pub ngram_threshold: f64,
    pub min_fog_index: f64,
}

impl Default for BuiltinConfig {
    fn default() -> Self {
        Self {
            entropy_threshold: 2.0,
            ngram_n: 3,
            ngram_threshold: 0.5,
            min_fog_index: 6.0,
        }
    }
}

impl BuiltinConfig {
    pub fn validate(&self) -> Result<(), AlgorithmError> {
        if self.ngram_n == 0 {
            return Err(AlgorithmError::InvalidParams(
                "ngram_n must be >= 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.ngram_threshold) {
            return Err(AlgorithmError::InvalidParams(format!(
                "ngram_threshold must be in [0, 1], got {}",
                self.ngram_threshold
            )));
        }
        Ok(())
    }
}

/// Register the built-in algorithms with default thresholds.
///
/// Filters: `entropy`, `ngram`, `readability_fog`, and `minhash` backed by
/// `dedup`. Rewrites: `pii_mask`.
pub fn register_builtin(
    registry: &AlgorithmRegistry,
    dedup: Arc<Deduplicator>,
) -> Result<(), AlgorithmError> {
    register_builtin_with_config(registry, dedup, &BuiltinConfig::default())
}

pub fn register_builtin_with_config(
    registry: &AlgorithmRegistry,
    dedup: Arc<Deduplicator>,
    config: &BuiltinConfig,
) -> Result<(), AlgorithmError> {
    config.validate()?;
    registry.register_filter(Arc::new(EntropyFilter::new(config.entropy_threshold)));
    registry.register_filter(Arc::new(NGramFilter::new(
        config.ngram_n,
        config.ngram_threshold,
    )));
    registry.register_filter(Arc::new(ReadabilityFilter::new(config.min_fog_index)));
    registry.register_filter(Arc::new(MinHashFilter::new(dedup)));
    registry.register_rewrite(Arc::new(PiiMaskRewrite::new()?));
    info!(
        filters = registry.names(Category::Filter).len(),
        rewrites = registry.names(Category::Rewrite).len(),
        "built-in algorithms registered"
    );
    Ok(())
}
