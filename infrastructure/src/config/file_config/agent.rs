//! Agent call configuration from TOML (`[agent]` section)

use imposter_application::CallPolicy;
use imposter_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Accepted sampling temperature range
const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

/// Raw agent call configuration from TOML
///
/// # Example
///
/// ```toml
/// [agent]
/// max_retries = 3
/// timeout_seconds = 30
/// backoff_ms = 1000            # doubles per retry
/// clue_temperature = 0.7
/// vote_temperature = 0.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub max_retries: u32,
    /// Per-attempt timeout
    pub timeout_seconds: u64,
    /// First retry delay
    pub backoff_ms: u64,
    pub clue_temperature: f32,
    pub vote_temperature: f32,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        let policy = CallPolicy::default();
        Self {
            max_retries: policy.max_retries,
            timeout_seconds: policy.attempt_timeout.as_secs(),
            backoff_ms: policy.backoff_base.as_millis() as u64,
            clue_temperature: policy.clue_temperature,
            vote_temperature: policy.vote_temperature,
        }
    }
}

impl FileAgentConfig {
    /// Convert into a [`CallPolicy`], clamping out-of-range temperatures
    pub fn to_call_policy(&self) -> (CallPolicy, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let mut timeout = Duration::from_secs(self.timeout_seconds);
        if self.timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidCallPolicy,
                "agent.timeout_seconds cannot be 0",
            ));
            timeout = CallPolicy::default().attempt_timeout;
        }

        let mut temperature = |field: &str, value: f32| {
            if TEMPERATURE_RANGE.contains(&value) {
                return value;
            }
            let clamped = value.clamp(*TEMPERATURE_RANGE.start(), *TEMPERATURE_RANGE.end());
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::TemperatureOutOfRange,
                format!(
                    "agent.{}: {} is outside 0.0-2.0, using {}",
                    field, value, clamped
                ),
            ));
            clamped
        };
        let clue_temperature = temperature("clue_temperature", self.clue_temperature);
        let vote_temperature = temperature("vote_temperature", self.vote_temperature);

        let policy = CallPolicy::default()
            .with_max_retries(self.max_retries)
            .with_attempt_timeout(timeout)
            .with_backoff_base(Duration::from_millis(self.backoff_ms))
            .with_clue_temperature(clue_temperature)
            .with_vote_temperature(vote_temperature);
        (policy, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_call_policy() {
        let (policy, issues) = FileAgentConfig::default().to_call_policy();
        assert!(issues.is_empty());
        assert_eq!(policy, CallPolicy::default());
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let config = FileAgentConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let (policy, issues) = config.to_call_policy();
        assert!(issues[0].is_error());
        assert_eq!(policy.attempt_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_temperature_clamped_with_warning() {
        let config = FileAgentConfig {
            vote_temperature: 3.5,
            ..Default::default()
        };
        let (policy, issues) = config.to_call_policy();
        assert_eq!(policy.vote_temperature, 2.0);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::TemperatureOutOfRange);
        assert!(!issues[0].is_error());
    }
}
