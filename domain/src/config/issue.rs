//! Structured configuration issues
//!
//! File configuration is checked as a whole and every problem is reported,
//! rather than stopping at the first one.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The configuration cannot be used.
    Error,
    /// Usable, but probably not what was intended.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `[models]` references a key that is not registered.
    UnknownModelKey,
    /// `[models]` defines no models at all.
    EmptyRegistry,
    /// `[game]` counts break the game rules.
    InvalidGameCounts,
    /// `[agent]` retry or timeout values are unusable.
    InvalidCallPolicy,
    /// `[backend]` temperature outside the accepted range.
    TemperatureOutOfRange,
    /// The API key environment variable is not set.
    MissingApiKey,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", label, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let issue = ConfigIssue::error(ConfigIssueCode::EmptyRegistry, "no models");
        assert!(issue.is_error());
        assert_eq!(issue.to_string(), "error: no models");

        let issue =
            ConfigIssue::warning(ConfigIssueCode::MissingApiKey, "OPENROUTER_API_KEY unset");
        assert!(!issue.is_error());
    }
}
