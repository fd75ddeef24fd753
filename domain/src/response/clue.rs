//! Clue call response

use super::schema::{ResponseSchema, SchemaViolation, check_confidence, check_len};
use crate::core::text::truncate;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const CLUE_RATIONALE_MIN: usize = 10;
pub const RATIONALE_MAX: usize = 2000;
pub const CLUE_MAX: usize = 50;

/// Placeholder clue text for a degraded turn
pub const FALLBACK_CLUE: &str = "[pass]";

/// What a player answers when asked for a clue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueResponse {
    /// Private reasoning, never shown to other agents
    #[serde(alias = "thinking")]
    pub rationale: String,
    pub clue: String,
    pub confidence: i64,
    #[serde(default)]
    pub word_hypothesis: Option<String>,
}

impl ClueResponse {
    /// Confidence clamped into a percentage
    pub fn confidence_pct(&self) -> u8 {
        self.confidence.clamp(0, 100) as u8
    }
}

impl ResponseSchema for ClueResponse {
    const NAME: &'static str = "clue_response";

    fn json_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "rationale": {
                    "type": "string",
                    "minLength": CLUE_RATIONALE_MIN,
                    "maxLength": RATIONALE_MAX,
                    "description": "Private reasoning about which clue to give"
                },
                "clue": {
                    "type": "string",
                    "minLength": 1,
                    "maxLength": CLUE_MAX,
                    "description": "A single word clue"
                },
                "confidence": {
                    "type": "integer",
                    "minimum": 0,
                    "maximum": 100
                },
                "word_hypothesis": {
                    "type": ["string", "null"],
                    "maxLength": CLUE_MAX,
                    "description": "Imposters only: best guess of the secret word"
                }
            },
            "required": ["rationale", "clue", "confidence", "word_hypothesis"],
            "additionalProperties": false
        })
    }

    fn validate(&self) -> Result<(), SchemaViolation> {
        check_len("rationale", &self.rationale, CLUE_RATIONALE_MIN, RATIONALE_MAX)?;
        check_len("clue", &self.clue, 1, CLUE_MAX)?;
        check_confidence(self.confidence)?;
        if let Some(guess) = &self.word_hypothesis {
            check_len("word_hypothesis", guess, 0, CLUE_MAX)?;
        }
        Ok(())
    }

    fn fallback(reason: &str) -> Self {
        Self {
            rationale: truncate(&format!("No usable answer ({})", reason), RATIONALE_MAX),
            clue: FALLBACK_CLUE.to_string(),
            confidence: 0,
            word_hypothesis: None,
        }
    }
}
