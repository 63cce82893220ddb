use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use curate::Params;
use serde::Deserialize;
use std::sync::Arc;

/// Filter pipeline request
#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub text: String,
    pub algorithms: Vec<String>,
    #[serde(default)]
    pub params: Params,
}

/// Run the named filters over one text, in order.
///
/// Responds with `{passed, reason, failed_at?}`. An empty list passes; an
/// unknown filter name reached before any rejection yields 404.
pub async fn run_filters(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<FilterRequest>,
) -> ServerResult<impl IntoResponse> {
    let outcome = state
        .engine
        .run_filters(&req.text, &req.algorithms, &req.params)?;

    tracing::debug!(passed = outcome.passed, filters = req.algorithms.len(), "filter run");
    Ok(Json(outcome))
}
