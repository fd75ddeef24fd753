//! Agent backend port
//!
//! Defines the interface for invoking a language-model backend. The backend
//! only moves text: retries, sanitizing and fallbacks live in the
//! application layer.

use async_trait::async_trait;
use imposter_domain::ChatMessage;
use thiserror::Error;

/// Errors that can occur during a backend invocation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Empty response")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,
}

impl BackendError {
    /// Whether another attempt could succeed
    ///
    /// An unknown model or a rejected credential will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            BackendError::UnknownModel(_) | BackendError::Unauthorized(_)
        )
    }
}

/// A single structured-output request
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRequest {
    /// Backend-specific model identifier (already resolved from the registry)
    pub model_id: String,
    pub messages: Vec<ChatMessage>,
    /// Name of the declared response schema
    pub schema_name: &'static str,
    /// JSON Schema of the expected response
    pub schema: serde_json::Value,
    pub temperature: f32,
}

/// Backend for agent calls
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Send the request and return the raw response text
    async fn invoke(&self, request: &AgentRequest) -> Result<String, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(!BackendError::UnknownModel("x".to_string()).is_retryable());
        assert!(!BackendError::Unauthorized("bad key".to_string()).is_retryable());
        assert!(BackendError::Timeout.is_retryable());
        assert!(BackendError::RateLimited("429".to_string()).is_retryable());
        assert!(BackendError::EmptyResponse.is_retryable());
    }
}
