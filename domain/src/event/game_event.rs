//! Game events
//!
//! The ordered event stream is the permanent record of a game. Every state
//! change the engine makes is published as exactly one of these, and
//! [`GameReplay`](super::replay::GameReplay) folds the stream back into state.

use crate::core::model::ModelKey;
use crate::game::{
    Clue, Elimination, GameResult, PlayerId, Role, Vote, VoteTally, Winner,
};
use serde::{Deserialize, Serialize};

/// One entry of the public roster (roles hidden)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: PlayerId,
    pub model: ModelKey,
}

/// A typed, tagged game event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    GameStart {
        category: String,
        num_imposters: usize,
        num_clue_rounds: u32,
        num_voting_rounds: u32,
        players: Vec<RosterEntry>,
    },
    RoundStart {
        round: u32,
        total_rounds: u32,
    },
    PlayerThinking {
        round: u32,
        player_id: PlayerId,
    },
    Clue {
        round: u32,
        player_id: PlayerId,
        /// Present only on imposters' clues
        #[serde(default, skip_serializing_if = "Option::is_none")]
        role: Option<Role>,
        clue_text: String,
        rationale: String,
        confidence: u8,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        word_hypothesis: Option<String>,
        #[serde(default)]
        degraded: bool,
    },
    RoundEnd {
        round: u32,
    },
    VotingRoundStart {
        voting_round: u32,
        total_voting_rounds: u32,
        eliminated_so_far: Vec<PlayerId>,
    },
    PlayerVoting {
        voting_round: u32,
        player_id: PlayerId,
    },
    Vote {
        voting_round: u32,
        player_id: PlayerId,
        /// `None` is an abstention
        target: Option<PlayerId>,
        rationale: String,
        confidence: u8,
        running_tally: VoteTally,
        #[serde(default)]
        degraded: bool,
    },
    Elimination {
        voting_round: u32,
        eliminated_player: Option<PlayerId>,
        was_imposter: bool,
        vote_counts: VoteTally,
        remaining_imposters: usize,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tied: Vec<PlayerId>,
    },
    VotingRoundEnd {
        voting_round: u32,
    },
    GameComplete {
        word: String,
        category: String,
        actual_imposters: Vec<PlayerId>,
        eliminated_players: Vec<PlayerId>,
        detection_accuracy: f64,
        total_clue_rounds: u32,
        winner: Winner,
    },
    ValidationError {
        player_id: PlayerId,
        raw_value: String,
        reason: String,
    },
    Error {
        message: String,
    },
}

impl GameEvent {
    /// Wire name of the event (`type` field)
    pub fn event_type(&self) -> &'static str {
        match self {
            GameEvent::GameStart { .. } => "game_start",
            GameEvent::RoundStart { .. } => "round_start",
            GameEvent::PlayerThinking { .. } => "player_thinking",
            GameEvent::Clue { .. } => "clue",
            GameEvent::RoundEnd { .. } => "round_end",
            GameEvent::VotingRoundStart { .. } => "voting_round_start",
            GameEvent::PlayerVoting { .. } => "player_voting",
            GameEvent::Vote { .. } => "vote",
            GameEvent::Elimination { .. } => "elimination",
            GameEvent::VotingRoundEnd { .. } => "voting_round_end",
            GameEvent::GameComplete { .. } => "game_complete",
            GameEvent::ValidationError { .. } => "validation_error",
            GameEvent::Error { .. } => "error",
        }
    }

    /// `game_complete` and `error` end a stream
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameComplete { .. } | GameEvent::Error { .. })
    }

    /// Clue event; the role is only disclosed for imposters
    pub fn clue(clue: &Clue, role: Role) -> Self {
        GameEvent::Clue {
            round: clue.round,
            player_id: clue.player_id.clone(),
            role: role.is_imposter().then_some(role),
            clue_text: clue.text.clone(),
            rationale: clue.rationale.clone(),
            confidence: clue.confidence,
            word_hypothesis: clue.word_hypothesis.clone(),
            degraded: clue.degraded,
        }
    }

    pub fn vote(vote: &Vote, running_tally: VoteTally) -> Self {
        GameEvent::Vote {
            voting_round: vote.voting_round,
            player_id: vote.voter_id.clone(),
            target: vote.target.clone(),
            rationale: vote.rationale.clone(),
            confidence: vote.confidence,
            running_tally,
            degraded: vote.degraded,
        }
    }

    pub fn elimination(elimination: &Elimination) -> Self {
        GameEvent::Elimination {
            voting_round: elimination.voting_round,
            eliminated_player: elimination.eliminated.clone(),
            was_imposter: elimination.was_imposter,
            vote_counts: elimination.vote_counts.clone(),
            remaining_imposters: elimination.remaining_imposters,
            tied: elimination.tied.clone(),
        }
    }

    pub fn game_complete(result: &GameResult) -> Self {
        GameEvent::GameComplete {
            word: result.word.clone(),
            category: result.category.clone(),
            actual_imposters: result.actual_imposters.clone(),
            eliminated_players: result.eliminated_players.clone(),
            detection_accuracy: result.detection_accuracy,
            total_clue_rounds: result.total_clue_rounds,
            winner: result.winner,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        GameEvent::Error {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_clue(text: &str) -> Clue {
        Clue {
            round: 1,
            player_id: PlayerId::from("Player_2"),
            text: text.to_string(),
            rationale: "Matches the category".to_string(),
            confidence: 60,
            word_hypothesis: None,
            degraded: false,
        }
    }

    #[test]
    fn test_tagged_serialization() {
        let event = GameEvent::RoundStart {
            round: 1,
            total_rounds: 3,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "round_start");
        assert_eq!(json["total_rounds"], 3);
        assert_eq!(event.event_type(), "round_start");
    }

    #[test]
    fn test_clue_role_only_for_imposters() {
        let civilian = GameEvent::clue(&sample_clue("beam"), Role::NonImposter);
        let json = serde_json::to_value(&civilian).unwrap();
        assert!(json.get("role").is_none());

        let imposter = GameEvent::clue(&sample_clue("sea"), Role::Imposter);
        let json = serde_json::to_value(&imposter).unwrap();
        assert_eq!(json["role"], "imposter");
        assert_eq!(json["clue_text"], "sea");
    }

    #[test]
    fn test_elimination_null_player_on_tie() {
        let event = GameEvent::Elimination {
            voting_round: 1,
            eliminated_player: None,
            was_imposter: false,
            vote_counts: VoteTally::new(),
            remaining_imposters: 1,
            tied: vec![PlayerId::from("Player_1"), PlayerId::from("Player_2")],
        };
        let json = serde_json::to_value(&event).unwrap();
        assert!(json["eliminated_player"].is_null());
        let back: GameEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_terminal_events() {
        assert!(GameEvent::error("boom").is_terminal());
        assert!(!GameEvent::RoundEnd { round: 1 }.is_terminal());
    }
}
