//! TF-IDF vectorization of a document batch.
//!
//! Vocabulary and document frequencies are computed over the batch passed in;
//! nothing carries over between calls.

use fxhash::FxHashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::vector::SparseVector;

/// Options for [`build_tfidf_with_config`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfIdfConfig {
    /// Compute per-document term frequencies in parallel.
    pub use_parallel: bool,
}

/// Vectorize `documents` with default options.
pub fn build_tfidf<S>(documents: &[S]) -> Vec<SparseVector>
where
    S: AsRef<str> + Sync,
{
    build_tfidf_with_config(documents, &TfIdfConfig::default())
}

/// Vectorize `documents`.
///
/// Tokens are lowercase whitespace-delimited words. For token `t` in document
/// `i`, `tf = count / token_total` and `idf = ln(N / (df + 1))`; the stored
/// weight is `tf * idf`. A document without tokens yields an empty vector.
pub fn build_tfidf_with_config<S>(documents: &[S], cfg: &TfIdfConfig) -> Vec<SparseVector>
where
    S: AsRef<str> + Sync,
{
    let n = documents.len();
    if n == 0 {
        return Vec::new();
    }

    let tf_list: Vec<FxHashMap<String, f64>> = if cfg.use_parallel {
        documents
            .par_iter()
            .map(|doc| term_frequencies(doc.as_ref()))
            .collect()
    } else {
        documents
            .iter()
            .map(|doc| term_frequencies(doc.as_ref()))
            .collect()
    };

    let mut df: FxHashMap<&str, usize> = FxHashMap::default();
    for tf in &tf_list {
        for token in tf.keys() {
            *df.entry(token.as_str()).or_insert(0) += 1;
        }
    }

    let n = n as f64;
    tf_list
        .iter()
        .map(|tf| {
            let mut vector = SparseVector::with_capacity(tf.len());
            for (token, &freq) in tf {
                let doc_freq = df.get(token.as_str()).copied().unwrap_or(0);
                let idf = (n / (doc_freq + 1) as f64).ln();
                vector.insert(token.clone(), freq * idf);
            }
            vector
        })
        .collect()
}

/// Relative frequency of each lowercase token in `text`.
fn term_frequencies(text: &str) -> FxHashMap<String, f64> {
    let lowered = text.to_lowercase();
    let mut counts: FxHashMap<String, f64> = FxHashMap::default();
    let mut total = 0usize;
    for word in lowered.split_whitespace() {
        *counts.entry(word.to_owned()).or_insert(0.0) += 1.0;
        total += 1;
    }
    if total == 0 {
        return counts;
    }
    let total = total as f64;
    for count in counts.values_mut() {
        *count /= total;
    }
    counts
}
