//! Ordered filter execution and single-algorithm invocation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::capability::{AlgorithmError, Category, Collaborators, FilterAlgorithm};
use crate::params::Params;
use crate::registry::{AlgorithmRegistry, RegistryError};

/// Observer for filter and pipeline timings.
pub trait PipelineMetrics: Send + Sync {
    fn record_filter(&self, name: &str, latency: Duration, keep: bool);
    fn record_pipeline(&self, latency: Duration, passed: bool);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// A listed filter is not registered. Nothing was run.
    #[error("algorithm '{0}' not found")]
    NotFound(String),
}

/// Errors from [`PipelineExecutor::invoke`].
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error(transparent)]
    NotFound(#[from] RegistryError),
    #[error(transparent)]
    Algorithm(#[from] AlgorithmError),
}

/// Result of a filter pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutcome {
    pub passed: bool,
    pub reason: String,
    /// Name of the filter that rejected the text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_at: Option<String>,
}

impl PipelineOutcome {
    fn passed() -> Self {
        Self {
            passed: true,
            reason: "passed all filters".to_string(),
            failed_at: None,
        }
    }

    fn failed(name: &str, reason: &str) -> Self {
        Self {
            passed: false,
            reason: format!("failed at {name}: {reason}"),
            failed_at: Some(name.to_string()),
        }
    }
}

/// Runs registered algorithms by name.
#[derive(Clone)]
pub struct PipelineExecutor {
    registry: Arc<AlgorithmRegistry>,
    metrics: Option<Arc<dyn PipelineMetrics>>,
}

impl PipelineExecutor {
    pub fn new(registry: Arc<AlgorithmRegistry>) -> Self {
        Self {
            registry,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn PipelineMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn registry(&self) -> &Arc<AlgorithmRegistry> {
        &self.registry
    }

    /// Run the named filters over `text` in order.
    ///
    /// Each name is resolved just before it runs. The first rejection stops
    /// the run and later names are neither resolved nor invoked; reaching an
    /// unknown name fails the call with [`PipelineError::NotFound`].
    pub fn run_filters<S: AsRef<str>>(
        &self,
        text: &str,
        names: &[S],
        params: &Params,
    ) -> Result<PipelineOutcome, PipelineError> {
        let started = Instant::now();
        let mut outcome = PipelineOutcome::passed();
        for name in names {
            let name = name.as_ref();
            let filter: Arc<dyn FilterAlgorithm> = self
                .registry
                .resolve_filter(name)
                .map_err(|_| PipelineError::NotFound(name.to_string()))?;

            let filter_started = Instant::now();
            let decision = filter.evaluate(text, params);
            if let Some(metrics) = &self.metrics {
                metrics.record_filter(name, filter_started.elapsed(), decision.keep);
            }
            if !decision.keep {
                debug!(filter = name, reason = %decision.reason, "text rejected");
                outcome = PipelineOutcome::failed(name, &decision.reason);
                break;
            }
        }

        if let Some(metrics) = &self.metrics {
            metrics.record_pipeline(started.elapsed(), outcome.passed);
        }
        Ok(outcome)
    }

    /// Run one algorithm of any category and return its output as JSON.
    ///
    /// Filters yield `{keep, reason}`, rewrites `{text}`, distill and
    /// synthetic algorithms whatever value they produce.
    pub async fn invoke(
        &self,
        category: Category,
        name: &str,
        input: &str,
        params: &Params,
        collaborators: &Collaborators,
    ) -> Result<Value, InvokeError> {
        debug!(%category, name, "invoking algorithm");
        let value = match category {
            Category::Filter => {
                let decision = self.registry.resolve_filter(name)?.evaluate(input, params);
                json!({ "keep": decision.keep, "reason": decision.reason })
            }
            Category::Rewrite => {
                let text = self
                    .registry
                    .resolve_rewrite(name)?
                    .rewrite(input, params, collaborators)
                    .await?;
                json!({ "text": text })
            }
            Category::Distill => {
                self.registry
                    .resolve_distill(name)?
                    .distill(input, params, collaborators)
                    .await?
            }
            Category::Synthetic => {
                self.registry
                    .resolve_synthetic(name)?
                    .synthesize(input, params, collaborators)
                    .await?
            }
        };
        Ok(value)
    }
}

impl std::fmt::Debug for PipelineExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineExecutor")
            .field("registry", &self.registry)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}
