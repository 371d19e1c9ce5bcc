//! No-op completion client for offline operation and tests.

use async_trait::async_trait;

use crate::{CompletionClient, LlmError};

/// Always reports itself unavailable; `complete` never succeeds. Used when
/// no escalation endpoint is configured so the engine degrades to its
/// rule-based fallbacks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCompletionClient;

#[async_trait]
impl CompletionClient for NoopCompletionClient {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        Err(LlmError::Unavailable)
    }

    fn is_available(&self) -> bool {
        false
    }
}
