//! Backend configuration from TOML (`[backend]` section)

use crate::openrouter::{DEFAULT_BASE_URL, OpenRouterConfig, OpenRouterError};
use imposter_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw backend configuration from TOML
///
/// The API key itself never lives in the file, only the name of the
/// environment variable holding it.
///
/// # Example
///
/// ```toml
/// [backend]
/// base_url = "https://openrouter.ai/api/v1"
/// api_key_env = "OPENROUTER_API_KEY"
/// max_tokens = 500
/// request_timeout_seconds = 60
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    pub base_url: String,
    pub api_key_env: String,
    pub max_tokens: u32,
    pub request_timeout_seconds: u64,
    /// Attribution headers
    pub app_url: Option<String>,
    pub app_title: Option<String>,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            max_tokens: 500,
            request_timeout_seconds: 60,
            app_url: None,
            app_title: Some("Imposter Arena".to_string()),
        }
    }
}

impl FileBackendConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.api_key_env.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingApiKey,
                "backend.api_key_env cannot be empty",
            ));
        }
        if self.request_timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidCallPolicy,
                "backend.request_timeout_seconds cannot be 0",
            ));
        }
        if self.max_tokens == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidCallPolicy,
                "backend.max_tokens is 0, every response will be empty",
            ));
        }
        issues
    }

    /// Read the API key from the environment and build the adapter config
    pub fn to_openrouter_config(&self) -> Result<OpenRouterConfig, OpenRouterError> {
        Ok(OpenRouterConfig::from_env(&self.api_key_env)?
            .with_base_url(self.base_url.as_str())
            .with_max_tokens(self.max_tokens)
            .with_request_timeout(Duration::from_secs(self.request_timeout_seconds))
            .with_app(self.app_url.clone(), self.app_title.clone()))
    }
}
