//! OpenRouter agent backend
//!
//! Sends one structured-output chat completion per call. Retries, timeouts
//! per attempt and fallbacks belong to the agent call client; this adapter
//! only classifies failures.

use super::error::{OpenRouterError, Result};
use super::protocol::{ChatCompletionRequest, ChatCompletionResponse, ResponseFormat};
use async_trait::async_trait;
use imposter_application::{AgentBackend, AgentRequest, BackendError};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, trace};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Connection settings for an OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub base_url: String,
    api_key: String,
    pub max_tokens: u32,
    /// Upper bound for a single HTTP exchange
    pub request_timeout: Duration,
    /// Sent as `HTTP-Referer` / `X-Title` for OpenRouter's app attribution
    pub app_url: Option<String>,
    pub app_title: Option<String>,
}

impl OpenRouterConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            max_tokens: 500,
            request_timeout: Duration::from_secs(60),
            app_url: None,
            app_title: Some("Imposter Arena".to_string()),
        }
    }

    /// Read the key from an environment variable
    pub fn from_env(var: &str) -> Result<Self> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(OpenRouterError::MissingApiKey(var.to_string())),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_app(mut self, url: Option<String>, title: Option<String>) -> Self {
        self.app_url = url;
        self.app_title = title;
        self
    }
}

/// [`AgentBackend`] over HTTP
pub struct OpenRouterBackend {
    config: OpenRouterConfig,
    client: Client,
}

impl OpenRouterBackend {
    pub fn new(config: OpenRouterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| OpenRouterError::ClientSetup(e.to_string()))?;

        info!("OpenRouter backend initialized ({})", config.base_url);
        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    async fn complete(&self, request: &AgentRequest) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &request.model_id,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: self.config.max_tokens,
            response_format: ResponseFormat::strict_schema(request.schema_name, &request.schema),
        };

        let mut builder = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body);
        if let Some(url) = &self.config.app_url {
            builder = builder.header("HTTP-Referer", url);
        }
        if let Some(title) = &self.config.app_title {
            builder = builder.header("X-Title", title);
        }

        debug!(
            "POST {} model={} schema={}",
            self.completions_url(),
            request.model_id,
            request.schema_name
        );
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        trace!("HTTP {} body: {}", status, text);

        if !status.is_success() {
            return Err(OpenRouterError::from_status(
                status.as_u16(),
                &text,
                &request.model_id,
            ));
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|e| OpenRouterError::Decode(e.to_string()))?;
        if let Some(error) = &parsed.error {
            let status = error
                .code
                .as_ref()
                .and_then(|c| c.as_u64())
                .and_then(|c| u16::try_from(c).ok())
                .unwrap_or(500);
            return Err(OpenRouterError::from_status(
                status,
                &serde_json::json!({ "error": { "message": error.message } }).to_string(),
                &request.model_id,
            ));
        }
        parsed.into_content().ok_or(OpenRouterError::EmptyResponse)
    }
}

#[async_trait]
impl AgentBackend for OpenRouterBackend {
    async fn invoke(&self, request: &AgentRequest) -> std::result::Result<String, BackendError> {
        self.complete(request).await.map_err(BackendError::from)
    }
}
