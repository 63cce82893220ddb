//! Algorithm categories and the capability traits implementations provide.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use external::{CompletionError, CompletionRequest, CompletionService, ExampleSource};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::params::Params;

/// The four fixed registry categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Filter,
    Rewrite,
    Distill,
    Synthetic,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Filter,
        Category::Rewrite,
        Category::Distill,
        Category::Synthetic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Filter => "filter",
            Category::Rewrite => "rewrite",
            Category::Distill => "distill",
            Category::Synthetic => "synthetic",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm category '{0}'")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "filter" => Ok(Category::Filter),
            "rewrite" => Ok(Category::Rewrite),
            "distill" => Ok(Category::Distill),
            "synthetic" => Ok(Category::Synthetic),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

/// Keep/drop verdict from a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDecision {
    pub keep: bool,
    pub reason: String,
}

impl FilterDecision {
    pub fn keep(reason: impl Into<String>) -> Self {
        Self {
            keep: true,
            reason: reason.into(),
        }
    }

    pub fn drop(reason: impl Into<String>) -> Self {
        Self {
            keep: false,
            reason: reason.into(),
        }
    }
}

/// Failures raised by rewrite, distill and synthetic algorithms.
#[derive(Debug, Error)]
pub enum AlgorithmError {
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("algorithm failed: {0}")]
    Failed(String),
}

/// External services handed to algorithms that need them, plus the model
/// target for completion calls made on this request's behalf.
#[derive(Clone)]
pub struct Collaborators {
    pub completion: Arc<dyn CompletionService>,
    pub examples: Arc<dyn ExampleSource>,
    pub model: String,
    pub base_url: String,
}

impl Collaborators {
    pub fn new(completion: Arc<dyn CompletionService>, examples: Arc<dyn ExampleSource>) -> Self {
        Self {
            completion,
            examples,
            model: String::new(),
            base_url: String::new(),
        }
    }

    pub fn with_target(mut self, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        self.model = model.into();
        self.base_url = base_url.into();
        self
    }

    /// Empty request aimed at this call's model and base URL.
    pub fn completion_request(&self) -> CompletionRequest {
        CompletionRequest::new(self.base_url.clone(), self.model.clone())
    }
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Synchronous keep/drop check.
pub trait FilterAlgorithm: Send + Sync {
    fn name(&self) -> &str;
    fn evaluate(&self, text: &str, params: &Params) -> FilterDecision;
}

/// Text-to-text transformation.
#[async_trait]
pub trait RewriteAlgorithm: Send + Sync {
    fn name(&self) -> &str;
    async fn rewrite(
        &self,
        text: &str,
        params: &Params,
        collaborators: &Collaborators,
    ) -> Result<String, AlgorithmError>;
}

/// Produces training data from a teacher model's answer to `prompt`.
#[async_trait]
pub trait DistillAlgorithm: Send + Sync {
    fn name(&self) -> &str;
    async fn distill(
        &self,
        prompt: &str,
        params: &Params,
        collaborators: &Collaborators,
    ) -> Result<Value, AlgorithmError>;
}

/// Generates new samples seeded by `prompt`.
#[async_trait]
pub trait SyntheticAlgorithm: Send + Sync {
    fn name(&self) -> &str;
    async fn synthesize(
        &self,
        prompt: &str,
        params: &Params,
        collaborators: &Collaborators,
    ) -> Result<Value, AlgorithmError>;
}

/// A registered implementation, tagged with its category.
#[derive(Clone)]
pub enum Algorithm {
    Filter(Arc<dyn FilterAlgorithm>),
    Rewrite(Arc<dyn RewriteAlgorithm>),
    Distill(Arc<dyn DistillAlgorithm>),
    Synthetic(Arc<dyn SyntheticAlgorithm>),
}

impl Algorithm {
    pub fn category(&self) -> Category {
        match self {
            Algorithm::Filter(_) => Category::Filter,
            Algorithm::Rewrite(_) => Category::Rewrite,
            Algorithm::Distill(_) => Category::Distill,
            Algorithm::Synthetic(_) => Category::Synthetic,
        }
    }

    /// Name reported by the implementation itself.
    pub fn name(&self) -> &str {
        match self {
            Algorithm::Filter(a) => a.name(),
            Algorithm::Rewrite(a) => a.name(),
            Algorithm::Distill(a) => a.name(),
            Algorithm::Synthetic(a) => a.name(),
        }
    }
}

impl fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Algorithm::{:?}({})", self.category(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_string_forms_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
            assert_eq!(
                serde_json::to_value(category).unwrap(),
                Value::String(category.to_string())
            );
        }
    }

    #[test]
    fn category_parsing_is_case_sensitive() {
        let err = "Filter".parse::<Category>().unwrap_err();
        assert_eq!(err, ParseCategoryError("Filter".into()));
    }

    #[test]
    fn decision_constructors() {
        assert!(FilterDecision::keep("ok").keep);
        assert!(!FilterDecision::drop("no").keep);
    }
}
