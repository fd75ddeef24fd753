//! Model keys and the model registry
//!
//! Players reference their backend through a short [`ModelKey`] (e.g. `haiku`).
//! The [`ModelRegistry`] resolves keys to backend-specific identifiers
//! (e.g. `anthropic/claude-3.5-haiku`). The registry is an explicit value that
//! is injected into the engine and checked at configuration time, so an
//! unknown key is rejected before a game starts instead of failing mid-game.

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Short model key used in configuration (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelKey(String);

impl ModelKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModelKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ModelKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ModelKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A registered backend model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Backend-specific identifier sent over the wire
    pub id: String,
    /// Human-readable name for display
    pub display_name: String,
}

/// Mapping from short model keys to backend identifiers
///
/// # Example
///
/// ```
/// use imposter_domain::core::model::{ModelKey, ModelRegistry};
///
/// let registry = ModelRegistry::new().register("fast", "vendor/fast-model", "Fast Model");
/// assert_eq!(registry.resolve(&ModelKey::new("fast")).unwrap(), "vendor/fast-model");
/// assert!(registry.resolve(&ModelKey::new("slow")).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelRegistry {
    entries: BTreeMap<ModelKey, ModelEntry>,
}

impl ModelRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the OpenRouter models the game was tuned on
    pub fn with_defaults() -> Self {
        Self::new()
            .register("llama", "meta-llama/llama-3.1-8b-instruct", "Llama 3.1 8B")
            .register("haiku", "anthropic/claude-3.5-haiku", "Claude 3.5 Haiku")
            .register("gemini", "google/gemini-flash-1.5", "Gemini Flash 1.5")
            .register(
                "gemini-2",
                "google/gemini-2.0-flash-exp:free",
                "Gemini 2.0 Flash (Free)",
            )
            .register("qwen", "qwen/qwq-32b:free", "Qwen QwQ 32B")
            .register("gpt4o-mini", "openai/gpt-4o-mini", "GPT-4o Mini")
            .register("mistral", "mistralai/mistral-7b-instruct", "Mistral 7B")
    }

    /// Register (or replace) a model under `key`
    pub fn register(
        mut self,
        key: impl Into<ModelKey>,
        id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        self.insert(key, id, display_name);
        self
    }

    /// In-place variant of [`register`](Self::register)
    pub fn insert(
        &mut self,
        key: impl Into<ModelKey>,
        id: impl Into<String>,
        display_name: impl Into<String>,
    ) {
        self.entries.insert(
            key.into(),
            ModelEntry {
                id: id.into(),
                display_name: display_name.into(),
            },
        );
    }

    /// Resolve a key to its backend identifier
    pub fn resolve(&self, key: &ModelKey) -> Result<&str, DomainError> {
        self.entries
            .get(key)
            .map(|e| e.id.as_str())
            .ok_or_else(|| DomainError::UnknownModel(key.to_string()))
    }

    pub fn get(&self, key: &ModelKey) -> Option<&ModelEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &ModelKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ModelKey> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve() {
        let registry = ModelRegistry::with_defaults();
        assert_eq!(
            registry.resolve(&ModelKey::new("haiku")).unwrap(),
            "anthropic/claude-3.5-haiku"
        );
        assert_eq!(
            registry.resolve(&ModelKey::new("gpt4o-mini")).unwrap(),
            "openai/gpt-4o-mini"
        );
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let registry = ModelRegistry::with_defaults();
        let err = registry.resolve(&ModelKey::new("gpt-9")).unwrap_err();
        assert_eq!(err, DomainError::UnknownModel("gpt-9".to_string()));
    }

    #[test]
    fn test_register_overrides_existing() {
        let registry = ModelRegistry::with_defaults().register("haiku", "custom/haiku", "Haiku");
        assert_eq!(
            registry.resolve(&ModelKey::new("haiku")).unwrap(),
            "custom/haiku"
        );
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn test_model_key_serializes_as_string() {
        let key = ModelKey::new("llama");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"llama\"");
        let parsed: ModelKey = serde_json::from_str("\"mistral\"").unwrap();
        assert_eq!(parsed.as_str(), "mistral");
    }
}
