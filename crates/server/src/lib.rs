//! Curate Server - HTTP REST API for dataset curation
//!
//! Exposes a [`curate::CurationEngine`] over axum: filter pipelines,
//! clustering, deduplication, evaluator reliability, QA example storage and
//! direct algorithm invocation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /`, `GET /health`, `GET /ready`
//! - `POST /api/v1/pipeline/filter` - run filters in order
//! - `POST /api/v1/cluster` - TF-IDF + K-Means over a batch
//! - `POST /api/v1/dedup` - MinHash near-duplicate check
//! - `POST /api/v1/rlhf/known_eval` - record a verified evaluation
//! - `POST /api/v1/rlhf/infer` - probability an evaluation is correct
//! - `POST /api/v1/posttrain/expert` and `/reference` - store QA pairs
//! - `GET /api/v1/algorithms` - registered names per category
//! - `POST /api/v1/algorithms/{category}/{name}` - run one algorithm
//! - `GET /api/v1/metadata` - version and state sizes
//!
//! Configuration comes from `CURATE_SERVER__*` environment variables (see
//! [`ServerConfig`]); errors are returned as `{"error": {code, message}}`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
