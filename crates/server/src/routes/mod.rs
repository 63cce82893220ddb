//! API route handlers
//!
//! - `health`: liveness, readiness and metadata
//! - `pipeline`: ordered filter runs
//! - `pretrain`: clustering and deduplication
//! - `rlhf`: evaluator reliability
//! - `posttrain`: expert and reference QA examples
//! - `algorithms`: registry listing and single-algorithm invocation

pub mod algorithms;
pub mod health;
pub mod pipeline;
pub mod posttrain;
pub mod pretrain;
pub mod rlhf;

use crate::error::{ServerError, ServerResult};
use axum::extract::OriginalUri;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info (GET /)
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Curate Server",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/api/v1/pipeline/filter",
            "/api/v1/cluster",
            "/api/v1/dedup",
            "/api/v1/rlhf/known_eval",
            "/api/v1/rlhf/infer",
            "/api/v1/posttrain/expert",
            "/api/v1/posttrain/reference",
            "/api/v1/algorithms",
            "/api/v1/algorithms/{category}/{name}",
            "/health",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found(OriginalUri(uri): OriginalUri) -> ServerError {
    ServerError::NotFound(format!("no route for {}", uri.path()))
}
