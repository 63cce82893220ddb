//! K-Means over sparse vectors.
//!
//! Initial centroids are drawn uniformly, with replacement, from the input
//! vectors. The random source is injectable so runs can be reproduced.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::vector::SparseVector;

/// Configuration for a K-Means run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansConfig {
    /// Number of clusters.
    pub k: usize,
    /// Upper bound on assignment/update rounds.
    pub max_iters: usize,
    /// Seed for centroid initialization. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    /// Assign points to centroids in parallel.
    pub use_parallel: bool,
}

impl KMeansConfig {
    pub fn new(k: usize, max_iters: usize) -> Self {
        Self {
            k,
            max_iters,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 8,
            max_iters: 100,
            seed: None,
            use_parallel: false,
        }
    }
}

/// Result of [`KMeans::fit`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clustering {
    /// Cluster index per input vector, aligned with input order.
    pub assignments: Vec<usize>,
    /// Centroids at the end of the run.
    pub centroids: Vec<SparseVector>,
    /// Assignment rounds executed.
    pub iterations: usize,
    /// `true` when a round produced no change, or no rounds were needed.
    pub converged: bool,
}

impl Clustering {
    fn empty() -> Self {
        Self {
            assignments: Vec::new(),
            centroids: Vec::new(),
            iterations: 0,
            converged: true,
        }
    }
}

/// K-Means clusterer.
#[derive(Debug, Clone, Default)]
pub struct KMeans {
    config: KMeansConfig,
}

impl KMeans {
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Run with a generator seeded from the config (or entropy when unset).
    pub fn fit(&self, vectors: &[SparseVector]) -> Clustering {
        let mut rng = match self.config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        self.fit_with_rng(vectors, &mut rng)
    }

    /// Run with a caller-supplied generator.
    ///
    /// - no vectors, or `k == 0`: empty result;
    /// - `k >= N`: every point is its own cluster, no iteration;
    /// - otherwise Lloyd iterations until no assignment changes or
    ///   `max_iters` rounds have run. Empty clusters keep their centroid.
    pub fn fit_with_rng(&self, vectors: &[SparseVector], rng: &mut fastrand::Rng) -> Clustering {
        let n = vectors.len();
        let k = self.config.k;

        if n == 0 || k == 0 {
            return Clustering::empty();
        }
        if k >= n {
            return Clustering {
                assignments: (0..n).collect(),
                centroids: vectors.to_vec(),
                iterations: 0,
                converged: true,
            };
        }

        let mut centroids: Vec<SparseVector> =
            (0..k).map(|_| vectors[rng.usize(0..n)].clone()).collect();
        let mut assignments = vec![0usize; n];
        let mut iterations = 0;
        let mut converged = false;

        for _ in 0..self.config.max_iters {
            iterations += 1;
            let next = assign_all(vectors, &centroids, self.config.use_parallel);
            let changed = next != assignments;
            assignments = next;
            if !changed {
                converged = true;
                break;
            }
            update_centroids(vectors, &assignments, &mut centroids);
        }

        debug!(n, k, iterations, converged, "k-means finished");
        Clustering {
            assignments,
            centroids,
            iterations,
            converged,
        }
    }
}

/// Cluster `vectors` into `k` groups with a fresh random initialization.
pub fn kmeans(vectors: &[SparseVector], k: usize, max_iters: usize) -> Vec<usize> {
    KMeans::new(KMeansConfig::new(k, max_iters))
        .fit(vectors)
        .assignments
}

/// Cluster `vectors` using `rng` for centroid initialization.
pub fn kmeans_with_rng(
    vectors: &[SparseVector],
    k: usize,
    max_iters: usize,
    rng: &mut fastrand::Rng,
) -> Vec<usize> {
    KMeans::new(KMeansConfig::new(k, max_iters))
        .fit_with_rng(vectors, rng)
        .assignments
}

/// Index of the closest centroid; ties keep the lowest index.
pub fn nearest_centroid(point: &SparseVector, centroids: &[SparseVector]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::MAX;
    for (c, centroid) in centroids.iter().enumerate() {
        let dist = point.euclidean_distance(centroid);
        if dist < best_dist {
            best_dist = dist;
            best = c;
        }
    }
    best
}

fn assign_all(vectors: &[SparseVector], centroids: &[SparseVector], parallel: bool) -> Vec<usize> {
    if parallel {
        vectors
            .par_iter()
            .map(|v| nearest_centroid(v, centroids))
            .collect()
    } else {
        vectors
            .iter()
            .map(|v| nearest_centroid(v, centroids))
            .collect()
    }
}

fn update_centroids(
    vectors: &[SparseVector],
    assignments: &[usize],
    centroids: &mut [SparseVector],
) {
    let k = centroids.len();
    let mut sums = vec![SparseVector::new(); k];
    let mut counts = vec![0usize; k];

    for (v, &c) in vectors.iter().zip(assignments) {
        counts[c] += 1;
        for (token, w) in v.iter() {
            sums[c].accumulate(token, w);
        }
    }

    for (c, (mut sum, count)) in sums.into_iter().zip(counts).enumerate() {
        if count > 0 {
            sum.scale(1.0 / count as f64);
            centroids[c] = sum;
        }
    }
}
