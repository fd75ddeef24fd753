//! Vote call response

use super::clue::RATIONALE_MAX;
use super::schema::{ResponseSchema, SchemaViolation, check_confidence, check_len};
use crate::core::text::truncate;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const VOTE_RATIONALE_MIN: usize = 20;
pub const TARGET_MAX: usize = 64;

/// Placeholder target for a degraded vote; never matches a player
pub const FALLBACK_TARGET: &str = "[abstain]";

/// What a player answers when asked to vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResponse {
    #[serde(alias = "thinking")]
    pub rationale: String,
    /// Player id of the suspect
    #[serde(alias = "vote")]
    pub target: String,
    pub confidence: i64,
}

impl VoteResponse {
    pub fn confidence_pct(&self) -> u8 {
        self.confidence.clamp(0, 100) as u8
    }
}

impl ResponseSchema for VoteResponse {
    const NAME: &'static str = "vote_response";

    fn json_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "rationale": {
                    "type": "string",
                    "minLength": VOTE_RATIONALE_MIN,
                    "maxLength": RATIONALE_MAX,
                    "description": "Private reasoning about who the imposter is"
                },
                "target": {
                    "type": "string",
                    "minLength": 1,
                    "maxLength": TARGET_MAX,
                    "description": "Player id to eliminate, e.g. Player_3"
                },
                "confidence": {
                    "type": "integer",
                    "minimum": 0,
                    "maximum": 100
                }
            },
            "required": ["rationale", "target", "confidence"],
            "additionalProperties": false
        })
    }

    fn validate(&self) -> Result<(), SchemaViolation> {
        check_len("rationale", &self.rationale, VOTE_RATIONALE_MIN, RATIONALE_MAX)?;
        check_len("target", &self.target, 1, TARGET_MAX)?;
        check_confidence(self.confidence)
    }

    fn fallback(reason: &str) -> Self {
        Self {
            rationale: truncate(
                &format!("No usable vote, abstaining ({})", reason),
                RATIONALE_MAX,
            ),
            target: FALLBACK_TARGET.to_string(),
            confidence: 0,
        }
    }
}
