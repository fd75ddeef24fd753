//! Model registry and assignment from TOML (`[models]` section)

use imposter_domain::{ConfigIssue, ConfigIssueCode, ModelKey, ModelRegistry, ModelStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A model added to (or replacing one in) the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileModelEntry {
    /// Backend model identifier, e.g. `openai/gpt-4o-mini`
    pub id: String,
    /// Display name (defaults to the id)
    pub name: Option<String>,
}

/// Raw model configuration from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// strategy = "mixed"                      # "single", "mixed", "role_based", "per_seat"
/// default = "gpt4o-mini"
/// distribution = { haiku = 2, gemini = 2, llama = 1 }
///
/// [models.registry.sonnet]
/// id = "anthropic/claude-3.5-sonnet"
/// name = "Claude 3.5 Sonnet"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Start from the built-in registry
    pub include_defaults: bool,
    /// Extra or overriding registry entries, by short key
    pub registry: BTreeMap<String, FileModelEntry>,
    pub strategy: String,
    /// Model for `single`
    pub model: Option<String>,
    /// Pool counts for `mixed`
    pub distribution: BTreeMap<String, usize>,
    /// Padding model for `mixed`
    pub default: Option<String>,
    /// Models for `role_based`
    pub imposter: Option<String>,
    pub civilian: Option<String>,
    /// Models for `per_seat`, in seat order
    pub seats: Vec<String>,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            include_defaults: true,
            registry: BTreeMap::new(),
            strategy: "mixed".to_string(),
            model: None,
            distribution: BTreeMap::new(),
            default: None,
            imposter: None,
            civilian: None,
            seats: Vec::new(),
        }
    }
}

impl FileModelsConfig {
    /// Build the registry the game resolves model keys against
    pub fn to_registry(&self) -> ModelRegistry {
        let mut registry = if self.include_defaults {
            ModelRegistry::with_defaults()
        } else {
            ModelRegistry::new()
        };
        for (key, entry) in &self.registry {
            let name = entry.name.clone().unwrap_or_else(|| entry.id.clone());
            registry.insert(key.as_str(), entry.id.as_str(), name);
        }
        registry
    }

    /// Parse the assignment strategy, collecting issues for missing fields
    ///
    /// Falls back to the built-in mixed distribution when the strategy cannot
    /// be built.
    pub fn parse_strategy(&self) -> (ModelStrategy, Vec<ConfigIssue>) {
        let missing = |field: &str| {
            ConfigIssue::error(
                ConfigIssueCode::UnknownModelKey,
                format!(
                    "models.{}: required by strategy '{}'",
                    field, self.strategy
                ),
            )
        };

        match self.strategy.to_lowercase().as_str() {
            "single" => match &self.model {
                Some(model) => (ModelStrategy::single(model.as_str()), vec![]),
                None => (ModelStrategy::default(), vec![missing("model")]),
            },
            "mixed" if self.distribution.is_empty() && self.default.is_none() => {
                (ModelStrategy::default(), vec![])
            }
            "mixed" => {
                let distribution: BTreeMap<ModelKey, usize> = self
                    .distribution
                    .iter()
                    .map(|(key, count)| (ModelKey::new(key.as_str()), *count))
                    .collect();
                let default = match (&self.default, self.distribution.keys().next()) {
                    (Some(default), _) => ModelKey::new(default.as_str()),
                    (None, Some(first)) => ModelKey::new(first.as_str()),
                    (None, None) => return (ModelStrategy::default(), vec![missing("default")]),
                };
                (
                    ModelStrategy::Mixed {
                        distribution,
                        default,
                    },
                    vec![],
                )
            }
            "role_based" | "role-based" => match (&self.imposter, &self.civilian) {
                (Some(imposter), Some(civilian)) => (
                    ModelStrategy::RoleBased {
                        imposter: ModelKey::new(imposter.as_str()),
                        civilian: ModelKey::new(civilian.as_str()),
                    },
                    vec![],
                ),
                _ => (
                    ModelStrategy::default(),
                    vec![missing("imposter / models.civilian")],
                ),
            },
            "per_seat" | "per-seat" if !self.seats.is_empty() => (
                ModelStrategy::PerSeat {
                    models: self.seats.iter().map(|s| ModelKey::new(s.as_str())).collect(),
                },
                vec![],
            ),
            "per_seat" | "per-seat" => (ModelStrategy::default(), vec![missing("seats")]),
            other => (
                ModelStrategy::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::UnknownModelKey,
                    format!(
                        "models.strategy: unknown value '{}', falling back to 'mixed'",
                        other
                    ),
                )],
            ),
        }
    }

    /// Check the registry and that every key the strategy uses resolves
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let registry = self.to_registry();
        if registry.is_empty() {
            return vec![ConfigIssue::error(
                ConfigIssueCode::EmptyRegistry,
                "models: registry is empty (include_defaults = false and no [models.registry] entries)",
            )];
        }

        let (strategy, mut issues) = self.parse_strategy();
        for (key, entry) in &self.registry {
            if entry.id.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownModelKey,
                    format!("models.registry.{}: id cannot be empty", key),
                ));
            }
        }
        for key in strategy.referenced_keys() {
            if !registry.contains(key) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownModelKey,
                    format!("models: unknown model key '{}'", key),
                ));
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> FileModelsConfig {
        #[derive(Deserialize)]
        struct Wrapper {
            models: FileModelsConfig,
        }
        toml::from_str::<Wrapper>(toml_str).unwrap().models
    }

    #[test]
    fn test_default_is_builtin_mixed() {
        let config = FileModelsConfig::default();
        assert_eq!(config.parse_strategy(), (ModelStrategy::default(), vec![]));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_registry_entries_extend_defaults() {
        let config = parse(
            r#"
[models]
strategy = "single"
model = "sonnet"

[models.registry.sonnet]
id = "anthropic/claude-3.5-sonnet"
"#,
        );
        let registry = config.to_registry();
        assert_eq!(
            registry.resolve(&ModelKey::new("sonnet")).unwrap(),
            "anthropic/claude-3.5-sonnet"
        );
        assert!(registry.contains(&ModelKey::new("llama")));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_unknown_key_reported() {
        let config = parse(
            r#"
[models]
strategy = "role_based"
imposter = "haiku"
civilian = "gpt-9"
"#,
        );
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::UnknownModelKey);
        assert!(issues[0].message.contains("gpt-9"));
    }

    #[test]
    fn test_mixed_defaults_to_first_key() {
        let config = parse(
            r#"
[models]
distribution = { llama = 3, haiku = 1 }
"#,
        );
        let (strategy, issues) = config.parse_strategy();
        assert!(issues.is_empty());
        match strategy {
            ModelStrategy::Mixed { default, distribution } => {
                assert_eq!(default, ModelKey::new("haiku"));
                assert_eq!(distribution[&ModelKey::new("llama")], 3);
            }
            other => panic!("unexpected strategy: {other:?}"),
        }
    }

    #[test]
    fn test_empty_registry_is_error() {
        let config = FileModelsConfig {
            include_defaults: false,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues[0].code, ConfigIssueCode::EmptyRegistry);
    }

    #[test]
    fn test_unknown_strategy_warns() {
        let config = FileModelsConfig {
            strategy: "round_robin".to_string(),
            ..Default::default()
        };
        let (_, issues) = config.parse_strategy();
        assert!(!issues[0].is_error());
    }
}
