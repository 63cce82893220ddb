use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use curate::{CurateConfig, CurationEngine};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Curation engine (registry, dedup history, evaluator profiles, examples)
    pub engine: CurationEngine,
}

impl ServerState {
    /// Create server state, loading the engine configuration from
    /// `config.engine_config` when set.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let engine_config = match &config.engine_config {
            Some(path) => CurateConfig::from_file(path)
                .map_err(|e| ServerError::Config(e.to_string()))?,
            None => CurateConfig::default(),
        };
        let engine = CurationEngine::new(engine_config)?;
        Ok(Self::with_engine(config, engine))
    }

    /// Create server state around an existing engine.
    pub fn with_engine(config: ServerConfig, engine: CurationEngine) -> Self {
        Self {
            config: Arc::new(config),
            engine,
        }
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
    pub dedup_signatures: usize,
    pub evaluators: usize,
}
