use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub mime: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub images: Vec<ImageAttachment>,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            images: Vec::new(),
            temperature: 0.2,
        }
    }

    pub fn with_images(mut self, images: Vec<ImageAttachment>) -> Self {
        self.images = images;
        self
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("rate limited (HTTP 429)")]
    RateLimited,

    #[error("model {0} not found (HTTP 404)")]
    ModelNotFound(String),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("empty completion")]
    EmptyResponse,
}

impl ProviderError {
    /// Only quota and missing-model answers are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::RateLimited | ProviderError::ModelNotFound(_))
    }
}

/// A hosted chat-completion model.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn complete(&self, req: &CompletionRequest) -> Result<String, ProviderError>;
    fn info(&self) -> ProviderInfo;
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(2),
        }
    }
}

/// Run `op` up to `max_attempts` times, sleeping a fixed backoff between
/// retryable failures. Non-retryable errors return immediately.
pub async fn with_retry<F, Fut, T>(policy: RetryPolicy, label: &str, mut op: F) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt: u32 = 1;
    loop {
        match op().await {
            Ok(v) => return Ok(v),
            Err(e) if e.is_retryable() && attempt < attempts => {
                warn!(call = label, attempt, max = attempts, "provider: {e}; retrying");
                tokio::time::sleep(policy.backoff).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
