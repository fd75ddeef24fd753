//! Agent call policy: retry, timeout and sampling control.
//!
//! [`CallPolicy`] groups the parameters the Agent Call Client applies to
//! every request. These are application-layer concerns, not game rules.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry, timeout and temperature settings for agent calls.
///
/// A call makes at most `max_retries + 1` attempts. Before retry `n`
/// (1-based) it waits `backoff_base * 2^(n-1)`: 1 s, 2 s, 4 s with defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Bound on a single backend invocation.
    pub attempt_timeout: Duration,
    /// First backoff delay; doubles per retry. Zero disables waiting.
    pub backoff_base: Duration,
    /// Sampling temperature for clue calls.
    pub clue_temperature: f32,
    /// Sampling temperature for vote calls.
    pub vote_temperature: f32,
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            attempt_timeout: Duration::from_secs(30),
            backoff_base: Duration::from_secs(1),
            clue_temperature: 0.7,
            vote_temperature: 0.5,
        }
    }
}

impl CallPolicy {
    // ==================== Builder Methods ====================

    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    pub fn with_clue_temperature(mut self, temperature: f32) -> Self {
        self.clue_temperature = temperature;
        self
    }

    pub fn with_vote_temperature(mut self, temperature: f32) -> Self {
        self.vote_temperature = temperature;
        self
    }

    /// Total attempts a call may make
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before retry `retry` (1-based)
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.backoff_base.saturating_mul(factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = CallPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.attempt_timeout, Duration::from_secs(30));
        assert_eq!(policy.clue_temperature, 0.7);
        assert_eq!(policy.vote_temperature, 0.5);
    }

    #[test]
    fn test_exponential_backoff() {
        let policy = CallPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(2), Duration::from_secs(2));
        assert_eq!(policy.backoff(3), Duration::from_secs(4));
    }

    #[test]
    fn test_zero_backoff() {
        let policy = CallPolicy::default().with_backoff_base(Duration::ZERO);
        assert!(policy.backoff(3).is_zero());
    }

    #[test]
    fn test_builder() {
        let policy = CallPolicy::default()
            .with_max_retries(0)
            .with_attempt_timeout(Duration::from_millis(50));
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.attempt_timeout, Duration::from_millis(50));
    }
}
