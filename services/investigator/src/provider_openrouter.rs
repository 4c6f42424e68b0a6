use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::StatusCode;

use crate::config::LlmConfig;
use crate::provider::{with_retry, CompletionRequest, LLMProvider, ProviderError, ProviderInfo, RetryPolicy};

/// OpenRouter-compatible chat-completions client.
pub struct OpenRouterProvider {
    base_url: String,
    api_key: String,
    model: String,
    referer: String,
    title: String,
    retry: RetryPolicy,
    client: reqwest::Client,
}

impl OpenRouterProvider {
    pub fn new(cfg: &LlmConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            referer: cfg.referer.clone(),
            title: cfg.title.clone(),
            retry: RetryPolicy {
                max_attempts: cfg.max_attempts,
                backoff: cfg.retry_backoff,
            },
            client,
        })
    }

    fn body(&self, req: &CompletionRequest) -> serde_json::Value {
        let content = if req.images.is_empty() {
            serde_json::Value::String(req.prompt.clone())
        } else {
            let mut parts = vec![serde_json::json!({"type": "text", "text": req.prompt})];
            for img in &req.images {
                let url = format!("data:{};base64,{}", img.mime, STANDARD.encode(&img.bytes));
                parts.push(serde_json::json!({"type": "image_url", "image_url": {"url": url}}));
            }
            serde_json::Value::Array(parts)
        };

        serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": content}],
            "temperature": req.temperature
        })
    }

    async fn send_once(&self, req: &CompletionRequest) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(&self.body(req))
            .send()
            .await
            .map_err(map_transport)?;

        match resp.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(ProviderError::RateLimited),
            StatusCode::NOT_FOUND => return Err(ProviderError::ModelNotFound(self.model.clone())),
            s if !s.is_success() => return Err(ProviderError::Status(s.as_u16())),
            _ => {}
        }

        let json: serde_json::Value = resp.json().await.map_err(map_transport)?;

        // Extract content
        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .trim();
        if content.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(content.to_string())
    }
}

fn map_transport(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Transport(e.to_string())
    }
}

#[async_trait]
impl LLMProvider for OpenRouterProvider {
    async fn complete(&self, req: &CompletionRequest) -> Result<String, ProviderError> {
        with_retry(self.retry, "chat_completions", || self.send_once(req)).await
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: "openrouter".to_string(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
        }
    }
}
