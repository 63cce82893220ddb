use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use curate::{Category, Params};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Single-algorithm invocation request
#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
    pub input: String,
    #[serde(default)]
    pub params: Params,
    /// Overrides the configured model name
    pub model: Option<String>,
    /// Overrides the configured completion server
    pub vllm_base_url: Option<String>,
}

/// Registered algorithm names, grouped by category.
pub async fn list_algorithms(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let registry = state.engine.registry();
    let mut out = Map::new();
    for category in Category::ALL {
        out.insert(category.to_string(), Value::from(registry.names(category)));
    }
    Ok(Json(Value::Object(out)))
}

/// Run one algorithm by category and name.
pub async fn invoke_algorithm(
    State(state): State<Arc<ServerState>>,
    Path((category, name)): Path<(String, String)>,
    Json(req): Json<InvokeRequest>,
) -> ServerResult<impl IntoResponse> {
    let category: Category = category
        .parse()
        .map_err(|e: curate::ParseCategoryError| ServerError::BadRequest(e.to_string()))?;

    let collaborators = state
        .engine
        .collaborators(req.model.as_deref(), req.vllm_base_url.as_deref());
    let output = state
        .engine
        .invoke(category, &name, &req.input, &req.params, &collaborators)
        .await?;

    Ok(Json(output))
}
