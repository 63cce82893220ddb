use thiserror::Error;

/// Failures at the completion-service boundary. None of these are retried
/// inside the workspace.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// No base URL was supplied for the request.
    #[error("completion base url is empty")]
    EmptyBaseUrl,
    /// Client construction or request transport failed.
    #[error("completion transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-200 status.
    #[error("completion api error ({status}): {body}")]
    Status { status: u16, body: String },
    /// The response body was not the expected shape.
    #[error("completion response could not be decoded: {0}")]
    Decode(String),
    /// The response carried no choices.
    #[error("completion response contained no choices")]
    EmptyChoices,
    #[error("invalid completion config: {0}")]
    InvalidConfig(String),
}
