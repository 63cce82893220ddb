use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use curate::{AlgorithmError, EngineError, InvokeError, PipelineError, RegistryError};
use serde::{Deserialize, Serialize};

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Algorithm error: {0}")]
    Algorithm(#[from] AlgorithmError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) | ServerError::Pipeline(_) | ServerError::Registry(_) => {
                StatusCode::NOT_FOUND
            }
            ServerError::Algorithm(AlgorithmError::Completion(_)) => StatusCode::BAD_GATEWAY,
            ServerError::Algorithm(AlgorithmError::InvalidParams(_)) => StatusCode::BAD_REQUEST,
            ServerError::Algorithm(_)
            | ServerError::Engine(_)
            | ServerError::Internal(_)
            | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::NotFound(_) | ServerError::Pipeline(_) | ServerError::Registry(_) => {
                "NOT_FOUND"
            }
            ServerError::Algorithm(AlgorithmError::Completion(_)) => "UPSTREAM_ERROR",
            ServerError::Algorithm(_) => "ALGORITHM_ERROR",
            ServerError::Engine(_) | ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<InvokeError> for ServerError {
    fn from(err: InvokeError) -> Self {
        match err {
            InvokeError::NotFound(e) => ServerError::Registry(e),
            InvokeError::Algorithm(e) => ServerError::Algorithm(e),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        });

        (status, body).into_response()
    }
}
