//! Error types for the OpenRouter adapter

use imposter_application::BackendError;
use thiserror::Error;

/// Result type alias for OpenRouter operations
pub type Result<T> = std::result::Result<T, OpenRouterError>;

/// Errors that can occur when talking to an OpenAI-compatible endpoint
#[derive(Error, Debug)]
pub enum OpenRouterError {
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),

    #[error("Missing API key (set {0})")]
    MissingApiKey(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Authentication rejected (HTTP {status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("Unknown model: {0}")]
    InvalidModel(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Response contained no message content")]
    EmptyResponse,
}

impl OpenRouterError {
    /// Classify a non-success HTTP status and its body
    pub fn from_status(status: u16, body: &str, model: &str) -> Self {
        let message = api_error_message(body);
        let lowered = message.to_lowercase();
        match status {
            401 | 403 => OpenRouterError::Unauthorized { status, message },
            404 => OpenRouterError::InvalidModel(model.to_string()),
            _ if lowered.contains("not a valid model") => {
                OpenRouterError::InvalidModel(model.to_string())
            }
            429 => OpenRouterError::RateLimited(message),
            _ => OpenRouterError::Status { status, message },
        }
    }
}

/// Pull `error.message` out of an API error body, falling back to the raw body
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

impl From<OpenRouterError> for BackendError {
    fn from(err: OpenRouterError) -> Self {
        match err {
            OpenRouterError::InvalidModel(model) => BackendError::UnknownModel(model),
            OpenRouterError::Unauthorized { message, .. } => BackendError::Unauthorized(message),
            e @ OpenRouterError::MissingApiKey(_) => BackendError::Unauthorized(e.to_string()),
            OpenRouterError::RateLimited(message) => BackendError::RateLimited(message),
            OpenRouterError::Transport(e) if e.is_timeout() => BackendError::Timeout,
            OpenRouterError::Transport(e) => BackendError::Connection(e.to_string()),
            OpenRouterError::EmptyResponse => BackendError::EmptyResponse,
            e @ (OpenRouterError::ClientSetup(_)
            | OpenRouterError::Status { .. }
            | OpenRouterError::Decode(_)) => BackendError::RequestFailed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let body = r#"{"error": {"message": "bad key", "code": 401}}"#;
        let err = OpenRouterError::from_status(401, body, "x/y");
        assert!(matches!(
            &err,
            OpenRouterError::Unauthorized { message, .. } if message == "bad key"
        ));
        assert!(!BackendError::from(err).is_retryable());

        let body = r#"{"error": {"message": "foo/bar is not a valid model ID"}}"#;
        let err = OpenRouterError::from_status(400, body, "foo/bar");
        assert_eq!(
            BackendError::from(err),
            BackendError::UnknownModel("foo/bar".to_string())
        );

        let err = OpenRouterError::from_status(429, "slow down", "x/y");
        assert!(BackendError::from(err).is_retryable());

        let err = OpenRouterError::from_status(502, "<html>bad gateway</html>", "x/y");
        let backend = BackendError::from(err);
        assert!(backend.is_retryable());
        assert!(backend.to_string().contains("502"));
    }
}
