//! Completion client abstraction for escalated slot extraction.
//!
//! The dialogue engine is rule-first; a completion model is only consulted
//! when the pattern cascade and its fallbacks fail. This crate isolates
//! that network dependency behind [`CompletionClient`] so the engine and
//! its tests never touch HTTP directly.

pub mod http;
pub mod noop;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpCompletionClient;
pub use noop::NoopCompletionClient;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("completion endpoint returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("completion backend unavailable")]
    Unavailable,
}

/// A text completion backend.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a prompt and return the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Whether this client can actually serve completions.
    fn is_available(&self) -> bool {
        true
    }
}
