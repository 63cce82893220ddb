use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Clustering request
#[derive(Debug, Deserialize)]
pub struct ClusterRequest {
    pub texts: Vec<String>,
    pub k: Option<usize>,
    pub max_iters: Option<usize>,
}

/// Clustering response
#[derive(Debug, Serialize, Deserialize)]
pub struct ClusterResponse {
    pub assignments: Vec<usize>,
    pub iterations: usize,
    pub converged: bool,
}

/// Deduplication request
#[derive(Debug, Deserialize)]
pub struct DedupRequest {
    pub text: String,
    pub threshold: Option<f64>,
}

/// Vectorize and cluster a batch of texts.
pub async fn cluster(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<ClusterRequest>,
) -> ServerResult<impl IntoResponse> {
    let engine = state.engine.clone();
    let result = tokio::task::spawn_blocking(move || {
        engine.cluster(&req.texts, req.k, req.max_iters)
    })
    .await
    .map_err(|e| ServerError::Internal(format!("clustering task failed: {e}")))?;

    Ok(Json(ClusterResponse {
        assignments: result.assignments,
        iterations: result.iterations,
        converged: result.converged,
    }))
}

/// Check one text against the dedup history, storing it when unique.
///
/// `threshold` is passed through unchecked, like the `minhash_threshold`
/// filter parameter: above 1 keeps everything, below 0 drops any text once
/// the history is non-empty.
pub async fn dedup(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<DedupRequest>,
) -> ServerResult<impl IntoResponse> {
    Ok(Json(state.engine.deduplicate(&req.text, req.threshold)))
}
