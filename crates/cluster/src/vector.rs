//! Sparse token-weight vectors.

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Mapping from token to weight. Absent tokens have weight 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SparseVector {
    weights: FxHashMap<String, f64>,
}

impl SparseVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            weights: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Weight of `token`, or 0 when absent.
    pub fn get(&self, token: &str) -> f64 {
        self.weights.get(token).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.weights.contains_key(token)
    }

    /// Set the weight of `token`, replacing any previous value.
    pub fn insert(&mut self, token: impl Into<String>, weight: f64) {
        self.weights.insert(token.into(), weight);
    }

    /// Add `weight` to the current weight of `token`.
    pub fn accumulate(&mut self, token: &str, weight: f64) {
        match self.weights.get_mut(token) {
            Some(w) => *w += weight,
            None => {
                self.weights.insert(token.to_owned(), weight);
            }
        }
    }

    /// Multiply every stored weight by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for w in self.weights.values_mut() {
            *w *= factor;
        }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.weights.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Euclidean distance over the union of both key sets.
    pub fn euclidean_distance(&self, other: &SparseVector) -> f64 {
        let mut sum = 0.0;
        for (token, &a) in &self.weights {
            let d = a - other.get(token);
            sum += d * d;
        }
        for (token, &b) in &other.weights {
            if !self.weights.contains_key(token) {
                sum += b * b;
            }
        }
        sum.sqrt()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for SparseVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut v = SparseVector::new();
        for (k, w) in iter {
            v.insert(k, w);
        }
        v
    }
}
