use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// A verified evaluation: what the evaluator reported and the ground truth.
#[derive(Debug, Deserialize)]
pub struct KnownEvalRequest {
    pub user_id: String,
    #[serde(default)]
    pub question_id: Option<String>,
    pub user_eval: bool,
    pub actual_correct: bool,
}

/// An unverified evaluation.
#[derive(Debug, Deserialize)]
pub struct InferRequest {
    pub user_id: String,
    #[serde(default)]
    pub question_id: Option<String>,
    pub user_eval: bool,
}

pub async fn known_eval(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<KnownEvalRequest>,
) -> ServerResult<impl IntoResponse> {
    state
        .engine
        .record_evaluation(&req.user_id, req.user_eval, req.actual_correct);
    tracing::debug!(
        user_id = %req.user_id,
        question_id = req.question_id.as_deref().unwrap_or(""),
        "evaluation recorded"
    );
    Ok(Json(json!({ "status": "profile updated" })))
}

pub async fn infer(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<InferRequest>,
) -> ServerResult<impl IntoResponse> {
    let p = state.engine.infer_correctness(&req.user_id, req.user_eval);
    Ok(Json(json!({ "inferred_actual_correct_probability": p })))
}
