//! Elimination records

use super::player::PlayerId;
use super::vote::VoteTally;
use serde::{Deserialize, Serialize};

/// Outcome of one voting round (terminal once recorded)
///
/// `eliminated` is `None` when every vote abstained or a tie was left
/// unresolved by the tie-break policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Elimination {
    pub voting_round: u32,
    pub eliminated: Option<PlayerId>,
    pub vote_counts: VoteTally,
    pub was_imposter: bool,
    pub remaining_imposters: usize,
    /// Tied leaders when the round ended in an unresolved tie
    pub tied: Vec<PlayerId>,
}

impl Elimination {
    pub fn is_empty(&self) -> bool {
        self.eliminated.is_none()
    }
}
