//! What an agent is shown when it is asked to act
//!
//! Contexts are snapshots taken immediately before a call. They hold exactly
//! the history recorded by calls earlier in the global call order, and never
//! reveal other players' roles.

use super::clue::PublicClue;
use super::player::{PlayerId, Role};
use super::vote::VoteTally;
use serde::{Deserialize, Serialize};

/// Input for a clue call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClueContext {
    pub player_id: PlayerId,
    pub role: Role,
    /// `None` for imposters
    pub secret_word: Option<String>,
    pub category: String,
    pub total_players: usize,
    pub num_imposters: usize,
    pub round: u32,
    pub total_rounds: u32,
    /// Every clue recorded so far, in call order
    pub visible_clues: Vec<PublicClue>,
    /// This player's own earlier answers, oldest first
    pub own_answers: Vec<String>,
}

impl ClueContext {
    pub fn is_imposter(&self) -> bool {
        self.role.is_imposter()
    }
}

/// A vote as other voters see it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastVote {
    pub voter_id: PlayerId,
    pub target: Option<PlayerId>,
}

/// Input for a vote call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteContext {
    pub player_id: PlayerId,
    pub role: Role,
    pub secret_word: Option<String>,
    pub category: String,
    pub num_imposters: usize,
    pub voting_round: u32,
    pub total_voting_rounds: u32,
    /// Full clue history
    pub clue_history: Vec<PublicClue>,
    /// Votes already cast in this voting round, in call order
    pub votes_so_far: Vec<CastVote>,
    pub running_tally: VoteTally,
    /// Active players, self included
    pub eligible_targets: Vec<PlayerId>,
    /// Players eliminated in earlier voting rounds
    pub eliminated: Vec<PlayerId>,
    pub own_answers: Vec<String>,
}

impl VoteContext {
    pub fn is_eligible(&self, target: &PlayerId) -> bool {
        self.eligible_targets.contains(target)
    }
}
