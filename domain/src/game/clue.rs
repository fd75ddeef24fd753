//! Clue records

use super::player::PlayerId;
use serde::{Deserialize, Serialize};

/// A recorded clue (immutable once recorded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clue {
    pub round: u32,
    pub player_id: PlayerId,
    pub text: String,
    pub rationale: String,
    pub confidence: u8,
    /// Imposters only: their current guess at the secret word
    pub word_hypothesis: Option<String>,
    /// True when the clue is a fallback placeholder rather than the agent's answer
    pub degraded: bool,
}

impl Clue {
    /// The part of a clue other players are allowed to see
    pub fn public_view(&self) -> PublicClue {
        PublicClue {
            round: self.round,
            player_id: self.player_id.clone(),
            text: self.text.clone(),
        }
    }
}

/// What other agents see of a clue: who said what, in which round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicClue {
    pub round: u32,
    pub player_id: PlayerId,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_view_hides_private_fields() {
        let clue = Clue {
            round: 2,
            player_id: PlayerId::from("Player_3"),
            text: "fog".to_string(),
            rationale: "I know it is the lighthouse".to_string(),
            confidence: 80,
            word_hypothesis: Some("lighthouse".to_string()),
            degraded: false,
        };
        let view = clue.public_view();
        assert_eq!(view.round, 2);
        assert_eq!(view.text, "fog");

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("rationale").is_none());
        assert!(json.get("word_hypothesis").is_none());
    }
}
