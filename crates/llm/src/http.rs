//! HTTP completion client.
//!
//! Speaks a minimal JSON protocol: POST `{"prompt": ..., "max_tokens": ...}`
//! to the configured endpoint, expect `{"text": ...}` back.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{CompletionClient, LlmError};

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    text: String,
}

pub struct HttpCompletionClient {
    client: reqwest::Client,
    endpoint: String,
    max_tokens: u32,
}

impl HttpCompletionClient {
    pub fn new(endpoint: String, max_tokens: u32, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            max_tokens,
        })
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = CompletionRequest {
            prompt,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, endpoint = %self.endpoint, "completion endpoint error");
            return Err(LlmError::Status(status));
        }

        let body: CompletionResponse = response.json().await?;
        tracing::debug!(chars = body.text.len(), "completion received");
        Ok(body.text)
    }
}
