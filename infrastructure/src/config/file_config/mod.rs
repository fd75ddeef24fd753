//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod agent;
mod backend;
mod game;
mod models;
mod output;

pub use agent::FileAgentConfig;
pub use backend::FileBackendConfig;
pub use game::FileGameConfig;
pub use models::{FileModelEntry, FileModelsConfig};
pub use output::{FileOutputConfig, FileOutputFormat};

use imposter_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration that cannot be used as-is
#[derive(Debug, Error)]
#[error("invalid configuration:\n{}", format_issues(.issues))]
pub struct ConfigValidationError {
    /// Every error-level issue found
    pub issues: Vec<ConfigIssue>,
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {}", issue.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Game rules and counts
    pub game: FileGameConfig,
    /// Model registry and assignment
    pub models: FileModelsConfig,
    /// Retry, timeout and temperature
    pub agent: FileAgentConfig,
    /// HTTP endpoint settings
    pub backend: FileBackendConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Game counts against the game rules
    /// 2. Model registry and strategy keys
    /// 3. Call policy and backend values
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.game.validate());
        issues.extend(self.models.validate());
        issues.extend(self.agent.to_call_policy().1);
        issues.extend(self.backend.validate());
        issues
    }

    /// Split issues into warnings (returned) and errors (failure)
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(ConfigIssue::is_error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError { issues: errors })
        }
    }
}
