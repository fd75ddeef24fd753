//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid game configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown model key: {0}")]
    UnknownModel(String),

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Player {0} has already been eliminated")]
    PlayerEliminated(String),

    #[error("Invalid phase transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Record does not belong to the current phase ({0})")]
    WrongPhase(String),

    #[error("Game is already complete")]
    GameComplete,
}

impl DomainError {
    /// Configuration problems are the only errors that abort a game before it starts
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidConfig(_) | DomainError::UnknownModel(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DomainError::UnknownModel("gpt-9".to_string());
        assert_eq!(error.to_string(), "Unknown model key: gpt-9");

        let error = DomainError::InvalidTransition {
            from: "setup".to_string(),
            to: "result".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid phase transition: setup -> result");
    }

    #[test]
    fn test_is_configuration() {
        assert!(DomainError::InvalidConfig("x".to_string()).is_configuration());
        assert!(DomainError::UnknownModel("x".to_string()).is_configuration());
        assert!(!DomainError::GameComplete.is_configuration());
        assert!(!DomainError::UnknownPlayer("Player_9".to_string()).is_configuration());
    }
}
