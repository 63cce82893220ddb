//! Workspace umbrella crate for dataset curation.
//!
//! Re-exports the component crates and wires them into a
//! [`CurationEngine`], which owns one instance of each stateful component
//! and hands out shared handles. There are no process-wide singletons; two
//! engines never share dedup history or evaluator profiles.

pub mod config;

pub use algorithm::{
    Algorithm, AlgorithmError, AlgorithmRegistry, BuiltinConfig, Category, Collaborators,
    DistillAlgorithm, FilterAlgorithm, FilterDecision, InvokeError, Params, ParseCategoryError,
    PipelineError, PipelineExecutor, PipelineMetrics, PipelineOutcome, RegistryError,
    RewriteAlgorithm, SyntheticAlgorithm, register_builtin, register_builtin_with_config,
};
pub use cluster::{
    Clustering, KMeans, KMeansConfig, SparseVector, TfIdfConfig, build_tfidf,
    build_tfidf_with_config, kmeans, kmeans_with_rng,
};
pub use config::{ConfigLoadError, CurateConfig};
pub use dedup::{
    DedupVerdict, Deduplicator, HashKind, LockPolicy, MinHashConfig, MinHashConfigError,
    Signature, jaccard_similarity, signature,
};
pub use external::{
    Completion, CompletionConfig, CompletionError, CompletionRequest, CompletionService,
    ExampleSource, ExampleStore, Message, QaPair, VllmClient,
};
pub use reliability::{
    ConfusionProfile, ReliabilityClassifier, ReliabilityConfig, ReliabilityError,
};

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// Errors raised while building a [`CurationEngine`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigLoadError),
    #[error("dedup configuration: {0}")]
    Dedup(#[from] MinHashConfigError),
    #[error("reliability configuration: {0}")]
    Reliability(#[from] ReliabilityError),
    #[error("algorithm setup: {0}")]
    Algorithm(#[from] AlgorithmError),
    #[error("completion client: {0}")]
    Completion(#[from] CompletionError),
}

/// Owns the registry, deduplicator, reliability classifier, example store
/// and completion client for one curation deployment.
#[derive(Clone)]
pub struct CurationEngine {
    config: Arc<CurateConfig>,
    registry: Arc<AlgorithmRegistry>,
    executor: PipelineExecutor,
    dedup: Arc<Deduplicator>,
    reliability: Arc<ReliabilityClassifier>,
    examples: Arc<ExampleStore>,
    completion: Arc<dyn CompletionService>,
}

impl CurationEngine {
    /// Build an engine that talks to an OpenAI-compatible server over HTTP.
    pub fn new(config: CurateConfig) -> Result<Self, EngineError> {
        let client = VllmClient::new(&config.completion.client())?;
        Self::with_completion(config, Arc::new(client))
    }

    /// Build an engine around a caller-supplied completion service.
    pub fn with_completion(
        config: CurateConfig,
        completion: Arc<dyn CompletionService>,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let dedup = Arc::new(Deduplicator::new(config.dedup.clone())?);
        let reliability = Arc::new(ReliabilityClassifier::new(config.reliability)?);
        let registry = Arc::new(AlgorithmRegistry::new());
        register_builtin_with_config(&registry, dedup.clone(), &config.filters)?;
        let executor = PipelineExecutor::new(registry.clone());

        info!(
            name = config.name.as_deref().unwrap_or("unnamed"),
            num_hashes = config.dedup.num_hashes,
            "curation engine ready"
        );

        Ok(Self {
            config: Arc::new(config),
            registry,
            executor,
            dedup,
            reliability,
            examples: Arc::new(ExampleStore::new()),
            completion,
        })
    }

    /// Attach a metrics observer to the filter pipeline.
    pub fn with_metrics(mut self, metrics: Arc<dyn PipelineMetrics>) -> Self {
        self.executor = self.executor.with_metrics(metrics);
        self
    }

    pub fn config(&self) -> &CurateConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<AlgorithmRegistry> {
        &self.registry
    }

    pub fn executor(&self) -> &PipelineExecutor {
        &self.executor
    }

    pub fn deduplicator(&self) -> &Arc<Deduplicator> {
        &self.dedup
    }

    pub fn reliability(&self) -> &Arc<ReliabilityClassifier> {
        &self.reliability
    }

    pub fn examples(&self) -> &Arc<ExampleStore> {
        &self.examples
    }

    /// Run the named filters over `text`, in order.
    pub fn run_filters<S: AsRef<str>>(
        &self,
        text: &str,
        names: &[S],
        params: &Params,
    ) -> Result<PipelineOutcome, PipelineError> {
        self.executor.run_filters(text, names, params)
    }

    /// TF-IDF vectors for `texts` using the configured parallelism.
    pub fn vectorize<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<SparseVector> {
        let cfg = TfIdfConfig {
            use_parallel: self.config.clustering.use_parallel,
        };
        build_tfidf_with_config(texts, &cfg)
    }

    /// Vectorize and cluster `texts`. `k` and `max_iters` fall back to the
    /// configured values.
    pub fn cluster<S: AsRef<str> + Sync>(
        &self,
        texts: &[S],
        k: Option<usize>,
        max_iters: Option<usize>,
    ) -> Clustering {
        let mut cfg = self.config.clustering.clone();
        if let Some(k) = k {
            cfg.k = k;
        }
        if let Some(max_iters) = max_iters {
            cfg.max_iters = max_iters;
        }
        KMeans::new(cfg).fit(&self.vectorize(texts))
    }

    pub fn deduplicate(&self, text: &str, threshold: Option<f64>) -> DedupVerdict {
        self.dedup.evaluate(text, threshold)
    }

    /// Record a verified evaluation.
    pub fn record_evaluation(&self, evaluator_id: &str, reported: bool, actual: bool) {
        self.reliability.update(evaluator_id, reported, actual);
    }

    /// Probability that an unverified evaluation is correct.
    pub fn infer_correctness(&self, evaluator_id: &str, reported: bool) -> f64 {
        self.reliability.infer_probability(evaluator_id, reported)
    }

    pub fn add_expert_example(&self, pair: QaPair) {
        self.examples.add_expert(pair);
    }

    pub fn add_reference_example(&self, pair: QaPair) {
        self.examples.add_reference(pair);
    }

    /// Collaborators for one algorithm call. `model` and `base_url` override
    /// the configured completion target.
    pub fn collaborators(&self, model: Option<&str>, base_url: Option<&str>) -> Collaborators {
        let target = &self.config.completion;
        Collaborators::new(self.completion.clone(), self.examples.clone()).with_target(
            model.unwrap_or(&target.model),
            base_url.unwrap_or(&target.base_url),
        )
    }

    /// Run one algorithm of any category by name.
    pub async fn invoke(
        &self,
        category: Category,
        name: &str,
        input: &str,
        params: &Params,
        collaborators: &Collaborators,
    ) -> Result<Value, InvokeError> {
        self.executor
            .invoke(category, name, input, params, collaborators)
            .await
    }
}

impl std::fmt::Debug for CurationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurationEngine")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("signatures", &self.dedup.len())
            .field("evaluators", &self.reliability.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> CurationEngine {
        CurationEngine::new(CurateConfig::default()).unwrap()
    }

    #[test]
    fn engine_registers_builtins() {
        let engine = engine();
        assert_eq!(engine.registry().names(Category::Filter).len(), 4);
        assert_eq!(engine.registry().names(Category::Rewrite), ["pii_mask"]);
    }

    #[test]
    fn minhash_filter_shares_engine_dedup_state() {
        let engine = engine();
        let text = "shared state between the filter and the engine";
        assert!(engine.deduplicate(text, None).keep);
        let outcome = engine.run_filters(text, &["minhash"], &Params::new()).unwrap();
        assert!(!outcome.passed);
    }

    #[test]
    fn engines_do_not_share_state() {
        let a = engine();
        let b = engine();
        a.record_evaluation("u", true, true);
        assert!(a.reliability().profile("u").is_some());
        assert!(b.reliability().profile("u").is_none());
    }

    #[test]
    fn cluster_uses_overrides() {
        let engine = engine();
        let texts = ["a b", "c d", "e f"];
        let result = engine.cluster(&texts, Some(5), None);
        assert_eq!(result.assignments, vec![0, 1, 2]);
    }

    #[test]
    fn cluster_follows_configured_kmeans_settings() {
        let mut config = CurateConfig::default();
        config.clustering = KMeansConfig::new(2, 20).with_seed(3).with_parallel(true);
        let engine = CurationEngine::new(config).unwrap();

        let texts = ["apple banana", "apple cherry", "kernel mutex", "kernel thread"];
        let result = engine.cluster(&texts, None, None);
        assert_eq!(result.assignments.len(), 4);
        assert!(result.assignments.iter().all(|&c| c < 2));
        assert!(result.iterations <= 20);
    }

    #[test]
    fn collaborators_default_to_configured_target() {
        let mut config = CurateConfig::default();
        config.completion.model = "default-model".into();
        config.completion.base_url = "http://inference:8000".into();
        let engine = CurationEngine::new(config).unwrap();

        let c = engine.collaborators(None, None);
        assert_eq!(c.model, "default-model");
        assert_eq!(c.base_url, "http://inference:8000");

        let c = engine.collaborators(Some("other"), None);
        assert_eq!(c.model, "other");
    }

    #[test]
    fn invalid_config_fails_construction() {
        let mut config = CurateConfig::default();
        config.dedup.num_hashes = 0;
        assert!(CurationEngine::new(config).is_err());
    }
}
