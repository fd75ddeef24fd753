//! Declared response schemas and the sanitize -> deserialize -> validate pipeline

use super::sanitize::sanitize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// A constraint the parsed value broke
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct SchemaViolation {
    pub field: &'static str,
    pub message: String,
}

impl SchemaViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Why raw output could not be turned into a response
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty response")]
    Empty,

    #[error("Malformed JSON: {0}")]
    Malformed(String),

    #[error("Schema violation: {0}")]
    Violation(SchemaViolation),
}

/// A statically declared structured-output record
pub trait ResponseSchema: Serialize + DeserializeOwned + Sized {
    /// Schema name sent to the backend
    const NAME: &'static str;

    /// JSON Schema advertised to the backend
    fn json_schema() -> serde_json::Value;

    /// Constraints serde cannot express (lengths, ranges)
    fn validate(&self) -> Result<(), SchemaViolation>;

    /// Placeholder used once retries are exhausted. Must pass [`Self::validate`].
    fn fallback(reason: &str) -> Self;
}

/// Parse raw backend text into `T`
pub fn parse_response<T: ResponseSchema>(raw: &str) -> Result<T, ParseError> {
    let cleaned = sanitize(raw);
    if cleaned.is_empty() {
        return Err(ParseError::Empty);
    }
    let value: T =
        serde_json::from_str(&cleaned).map_err(|e| ParseError::Malformed(e.to_string()))?;
    value.validate().map_err(ParseError::Violation)?;
    Ok(value)
}

pub(crate) fn check_len(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), SchemaViolation> {
    let len = value.trim().chars().count();
    if len < min {
        return Err(SchemaViolation::new(
            field,
            format!("must be at least {} characters (got {})", min, len),
        ));
    }
    if len > max {
        return Err(SchemaViolation::new(
            field,
            format!("must be at most {} characters (got {})", max, len),
        ));
    }
    Ok(())
}

pub(crate) fn check_confidence(value: i64) -> Result<(), SchemaViolation> {
    if !(0..=100).contains(&value) {
        return Err(SchemaViolation::new(
            "confidence",
            format!("must be between 0 and 100 (got {})", value),
        ));
    }
    Ok(())
}
