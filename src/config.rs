//! YAML configuration for the curation engine.
//!
//! Every section is optional; missing sections and fields take their
//! defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "nightly curation"
//!
//! dedup:
//!   num_hashes: 100
//!   seed: 0
//!   hash_kind: fnv1a
//!   threshold: 0.8
//!   lock_policy: serialized
//!
//! filters:
//!   entropy_threshold: 2.0
//!   ngram_n: 3
//!   ngram_threshold: 0.5
//!   min_fog_index: 6.0
//!
//! clustering:
//!   k: 8
//!   max_iters: 100
//!   seed: 42
//!   use_parallel: true
//!
//! reliability:
//!   smoothing: 1.0
//!   prior_correct: 0.5
//!   unknown_probability: 0.5
//!
//! completion:
//!   base_url: "http://localhost:8000"
//!   model: "qwen2.5-7b-instruct"
//!   timeout_ms: 30000
//! ```

use std::fs;
use std::path::Path;

use algorithm::BuiltinConfig;
use cluster::KMeansConfig;
use dedup::MinHashConfig;
use external::CompletionConfig;
use reliability::ReliabilityConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Default completion target plus HTTP client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionYamlConfig {
    /// Used when a request does not name its own inference server.
    pub base_url: String,
    /// Used when a request does not name its own model.
    pub model: String,
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
    pub use_env_proxy: bool,
}

impl Default for CompletionYamlConfig {
    fn default() -> Self {
        let http = CompletionConfig::default();
        Self {
            base_url: String::new(),
            model: String::new(),
            timeout_ms: http.timeout_ms,
            connect_timeout_ms: http.connect_timeout_ms,
            use_env_proxy: http.use_env_proxy,
        }
    }
}

impl CompletionYamlConfig {
    pub fn client(&self) -> CompletionConfig {
        CompletionConfig::default()
            .with_timeout_ms(self.timeout_ms)
            .with_connect_timeout_ms(self.connect_timeout_ms)
            .with_env_proxy(self.use_env_proxy)
    }
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CurateConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub dedup: MinHashConfig,

    #[serde(default)]
    pub filters: BuiltinConfig,

    /// K-Means settings; `use_parallel` also drives TF-IDF vectorization.
    #[serde(default)]
    pub clustering: KMeansConfig,

    #[serde(default)]
    pub reliability: ReliabilityConfig,

    #[serde(default)]
    pub completion: CompletionYamlConfig,
}

impl CurateConfig {
    /// Load and validate a YAML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML configuration from a string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: CurateConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.dedup
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("dedup: {e}")))?;
        self.filters
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("filters: {e}")))?;
        if self.clustering.max_iters == 0 {
            return Err(ConfigLoadError::Validation(
                "clustering.max_iters must be >= 1".to_string(),
            ));
        }
        self.reliability
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("reliability: {e}")))?;
        self.completion
            .client()
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("completion: {e}")))?;
        Ok(())
    }
}

impl Default for CurateConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            dedup: MinHashConfig::default(),
            filters: BuiltinConfig::default(),
            clustering: KMeansConfig::default(),
            reliability: ReliabilityConfig::default(),
            completion: CompletionYamlConfig::default(),
        }
    }
}
