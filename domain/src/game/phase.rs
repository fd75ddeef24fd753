//! Game phases
//!
//! SETUP -> CLUE_ROUND(1..N) -> VOTING_ROUND(1..M) -> RESULT

use serde::{Deserialize, Serialize};

/// Phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase", content = "round")]
pub enum GamePhase {
    /// Roles dealt, nothing asked yet
    Setup,
    /// Clue round (1-based)
    ClueRound(u32),
    /// Voting round (1-based)
    VotingRound(u32),
    /// Terminal: result computed, game immutable
    Result,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Setup => "setup",
            GamePhase::ClueRound(_) => "clue_round",
            GamePhase::VotingRound(_) => "voting_round",
            GamePhase::Result => "result",
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            GamePhase::Setup => "Setup".to_string(),
            GamePhase::ClueRound(n) => format!("Clue Round {}", n),
            GamePhase::VotingRound(n) => format!("Voting Round {}", n),
            GamePhase::Result => "Result".to_string(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Result)
    }

    /// Whether `next` may follow this phase, given the configured round counts
    ///
    /// Voting may end early (win condition), clue rounds may not.
    pub fn can_transition_to(&self, next: GamePhase, clue_rounds: u32, voting_rounds: u32) -> bool {
        match (*self, next) {
            (GamePhase::Setup, GamePhase::ClueRound(1)) => true,
            (GamePhase::ClueRound(n), GamePhase::ClueRound(m)) => m == n + 1 && m <= clue_rounds,
            (GamePhase::ClueRound(n), GamePhase::VotingRound(1)) => n == clue_rounds,
            (GamePhase::VotingRound(n), GamePhase::VotingRound(m)) => {
                m == n + 1 && m <= voting_rounds
            }
            (GamePhase::VotingRound(_), GamePhase::Result) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
