//! OpenAI-compatible chat-completion client (vLLM and friends).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::completion::{Completion, CompletionRequest, CompletionService};
use crate::error::CompletionError;

/// HTTP settings for [`VllmClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Whole-request timeout.
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
    pub pool_max_idle_per_host: usize,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_env_proxy: bool,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            pool_max_idle_per_host: 32,
            use_env_proxy: true,
        }
    }
}

impl CompletionConfig {
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_connect_timeout_ms(mut self, connect_timeout_ms: u64) -> Self {
        self.connect_timeout_ms = connect_timeout_ms;
        self
    }

    pub fn with_env_proxy(mut self, use_env_proxy: bool) -> Self {
        self.use_env_proxy = use_env_proxy;
        self
    }

    pub fn validate(&self) -> Result<(), CompletionError> {
        if self.timeout_ms == 0 {
            return Err(CompletionError::InvalidConfig(
                "timeout_ms must be greater than zero".into(),
            ));
        }
        if self.connect_timeout_ms == 0 {
            return Err(CompletionError::InvalidConfig(
                "connect_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    #[serde(default)]
    logprobs: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

/// Client posting to `{base_url}/v1/chat/completions`.
#[derive(Debug, Clone)]
pub struct VllmClient {
    http: reqwest::Client,
}

impl VllmClient {
    pub fn new(config: &CompletionConfig) -> Result<Self, CompletionError> {
        config.validate()?;
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .pool_max_idle_per_host(config.pool_max_idle_per_host);
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;
        Ok(Self { http })
    }

    fn endpoint(base_url: &str) -> String {
        format!("{}/v1/chat/completions", base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionService for VllmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        if request.base_url.trim().is_empty() {
            return Err(CompletionError::EmptyBaseUrl);
        }

        let url = Self::endpoint(&request.base_url);
        debug!(%url, model = %request.model, "sending chat completion");

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "completion service returned an error");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: ChatResponse = serde_json::from_slice(&bytes)
            .map_err(|e| CompletionError::Decode(e.to_string()))?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::EmptyChoices)?;

        Ok(Completion {
            text: choice.message.content,
            logprobs: choice.logprobs.filter(|v| !v.is_null()),
        })
    }
}
