//! # Curate External Collaborators
//!
//! The boundary between the curation core and the services it leans on:
//!
//! - [`CompletionService`]: an opaque chat-completion endpoint. [`VllmClient`]
//!   speaks the OpenAI-compatible protocol served by vLLM.
//! - [`ExampleSource`]: read access to expert and reference QA pairs, with
//!   [`ExampleStore`] as the in-memory implementation.
//!
//! Nothing in this crate retries. Failures surface as [`CompletionError`].
pub mod completion;
pub mod error;
pub mod store;
pub mod vllm;

pub use crate::completion::{Completion, CompletionRequest, CompletionService, Message};
pub use crate::error::CompletionError;
pub use crate::store::{ExampleSource, ExampleStore, QaPair};
pub use crate::vllm::{CompletionConfig, VllmClient};
