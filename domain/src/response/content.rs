//! Content rules for clues
//!
//! A clue that parsed fine can still break the game's rules: it must be a
//! single token and must not give away the secret word.

use super::clue::CLUE_MAX;
use thiserror::Error;

/// Words this short are only rejected on an exact match
const PARTIAL_MATCH_MIN_LEN: usize = 4;

/// Why a well-formed clue was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClueViolation {
    #[error("clue is empty")]
    Empty,

    #[error("clue must be a single word")]
    MultiWord,

    #[error("clue is longer than 50 characters")]
    TooLong,

    #[error("clue reveals the secret word")]
    SecretWordLeak,
}

impl ClueViolation {
    /// Stable reason code used in `validation_error` events
    pub fn reason(&self) -> &'static str {
        match self {
            ClueViolation::Empty => "empty_clue",
            ClueViolation::MultiWord => "multi_word",
            ClueViolation::TooLong => "too_long",
            ClueViolation::SecretWordLeak => "secret_word_leak",
        }
    }
}

/// Normalize and check a clue, returning the cleaned token
///
/// Surrounding quotes and punctuation are dropped. Hyphenated words count as
/// one token.
pub fn validate_clue(clue: &str, secret_word: &str) -> Result<String, ClueViolation> {
    let token = clue
        .trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '.' | ',' | '!' | '?' | '`'))
        .trim();

    if token.is_empty() {
        return Err(ClueViolation::Empty);
    }
    if token.split_whitespace().count() > 1 {
        return Err(ClueViolation::MultiWord);
    }
    if token.chars().count() > CLUE_MAX {
        return Err(ClueViolation::TooLong);
    }

    let lowered = token.to_lowercase();
    let secret = secret_word.trim().to_lowercase();
    if lowered == secret {
        return Err(ClueViolation::SecretWordLeak);
    }
    if secret.chars().count() >= PARTIAL_MATCH_MIN_LEN
        && (lowered.contains(&secret) || secret.contains(&lowered))
    {
        return Err(ClueViolation::SecretWordLeak);
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_clue_normalized() {
        assert_eq!(validate_clue("  \"Beacon.\" ", "lighthouse").unwrap(), "Beacon");
        assert_eq!(validate_clue("fog-horn", "lighthouse").unwrap(), "fog-horn");
    }

    #[test]
    fn test_rejects_multi_word_and_empty() {
        assert_eq!(validate_clue("tall tower", "lighthouse"), Err(ClueViolation::MultiWord));
        assert_eq!(validate_clue(" ... ", "lighthouse"), Err(ClueViolation::Empty));
        assert_eq!(
            validate_clue(&"a".repeat(60), "lighthouse"),
            Err(ClueViolation::TooLong)
        );
    }

    #[test]
    fn test_rejects_secret_word() {
        assert_eq!(
            validate_clue("LIGHTHOUSE", "lighthouse"),
            Err(ClueViolation::SecretWordLeak)
        );
        assert_eq!(
            validate_clue("lighthouses", "lighthouse"),
            Err(ClueViolation::SecretWordLeak)
        );
        assert_eq!(validate_clue("light", "lighthouse"), Err(ClueViolation::SecretWordLeak));
    }

    #[test]
    fn test_short_secret_only_exact_match() {
        assert_eq!(validate_clue("cat", "cat"), Err(ClueViolation::SecretWordLeak));
        assert!(validate_clue("catalog", "cat").is_ok());
    }

    #[test]
    fn test_reason_codes() {
        assert_eq!(ClueViolation::SecretWordLeak.reason(), "secret_word_leak");
        assert_eq!(ClueViolation::MultiWord.reason(), "multi_word");
    }
}
