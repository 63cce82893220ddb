//! # Curate Clustering
//!
//! TF-IDF vectorization and K-Means clustering for grouping text samples by
//! topic.
//!
//! ```text
//! texts ──► build_tfidf ──► Vec<SparseVector> ──► KMeans::fit ──► Clustering
//! ```
//!
//! Both stages are stateless. Vocabulary is scoped to a single batch, and
//! K-Means draws its initial centroids from a [`fastrand::Rng`] that callers
//! can seed for reproducible output.
//!
//! ## Example
//!
//! ```
//! use cluster::{build_tfidf, KMeans, KMeansConfig};
//!
//! let docs = ["rust borrow checker", "rust lifetimes", "sourdough bread", "rye bread"];
//! let vectors = build_tfidf(&docs);
//! let result = KMeans::new(KMeansConfig::new(2, 50).with_seed(42)).fit(&vectors);
//!
//! assert_eq!(result.assignments.len(), docs.len());
//! assert!(result.assignments.iter().all(|&c| c < 2));
//! ```
pub mod kmeans;
pub mod tfidf;
pub mod vector;

pub use crate::kmeans::{
    kmeans, kmeans_with_rng, nearest_centroid, Clustering, KMeans, KMeansConfig,
};
pub use crate::tfidf::{build_tfidf, build_tfidf_with_config, TfIdfConfig};
pub use crate::vector::SparseVector;
