use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use curate::QaPair;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Request carrying one QA pair.
#[derive(Debug, Deserialize)]
pub struct QaRequest {
    pub qa: QaPair,
}

fn check(pair: &QaPair) -> ServerResult<()> {
    if pair.question.trim().is_empty() || pair.answer.trim().is_empty() {
        return Err(ServerError::BadRequest(
            "question and answer must be non-empty".to_string(),
        ));
    }
    Ok(())
}

pub async fn add_expert(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<QaRequest>,
) -> ServerResult<impl IntoResponse> {
    check(&req.qa)?;
    state.engine.add_expert_example(req.qa);
    Ok(Json(json!({
        "status": "expert data stored",
        "count": state.engine.examples().expert_len(),
    })))
}

pub async fn add_reference(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<QaRequest>,
) -> ServerResult<impl IntoResponse> {
    check(&req.qa)?;
    state.engine.add_reference_example(req.qa);
    Ok(Json(json!({
        "status": "reference QA stored",
        "count": state.engine.examples().reference_len(),
    })))
}
