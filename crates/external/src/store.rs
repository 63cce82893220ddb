//! Expert and reference question/answer examples.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A curated question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl QaPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            domain: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}

/// Read-only view of stored examples, as consumed by algorithms.
pub trait ExampleSource: Send + Sync {
    /// Copy of all expert-written examples, in insertion order.
    fn expert_examples(&self) -> Vec<QaPair>;
    /// Copy of all reference examples, in insertion order.
    fn reference_examples(&self) -> Vec<QaPair>;
}

/// In-memory example store living for the process lifetime.
#[derive(Debug, Default)]
pub struct ExampleStore {
    expert: RwLock<Vec<QaPair>>,
    reference: RwLock<Vec<QaPair>>,
}

impl ExampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_expert(&self, pair: QaPair) {
        let mut guard = self.expert.write().unwrap_or_else(|p| p.into_inner());
        guard.push(pair);
        debug!(total = guard.len(), "expert example added");
    }

    pub fn add_reference(&self, pair: QaPair) {
        let mut guard = self.reference.write().unwrap_or_else(|p| p.into_inner());
        guard.push(pair);
        debug!(total = guard.len(), "reference example added");
    }

    pub fn expert_len(&self) -> usize {
        self.expert.read().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn reference_len(&self) -> usize {
        self.reference.read().unwrap_or_else(|p| p.into_inner()).len()
    }
}

impl ExampleSource for ExampleStore {
    fn expert_examples(&self) -> Vec<QaPair> {
        self.expert.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    fn reference_examples(&self) -> Vec<QaPair> {
        self.reference
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_kept_apart() {
        let store = ExampleStore::new();
        store.add_expert(QaPair::new("q1", "a1").with_domain("math"));
        store.add_reference(QaPair::new("q2", "a2"));
        store.add_reference(QaPair::new("q3", "a3"));

        assert_eq!(store.expert_len(), 1);
        assert_eq!(store.reference_len(), 2);
        assert_eq!(store.expert_examples()[0].domain.as_deref(), Some("math"));
        assert_eq!(store.reference_examples()[1].question, "q3");
    }

    #[test]
    fn listing_returns_a_snapshot() {
        let store = ExampleStore::new();
        store.add_expert(QaPair::new("q", "a"));
        let snapshot = store.expert_examples();
        store.add_expert(QaPair::new("q2", "a2"));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.expert_len(), 2);
    }

    #[test]
    fn domain_is_optional_on_the_wire() {
        let pair: QaPair = serde_json::from_str(r#"{"question":"q","answer":"a"}"#).unwrap();
        assert!(pair.domain.is_none());
        let json = serde_json::to_string(&pair).unwrap();
        assert!(!json.contains("domain"));
    }
}
