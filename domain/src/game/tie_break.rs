//! Tie-break policy for voting rounds
//!
//! Published variants of the game disagree on ties (dealer decides, revote,
//! random, nobody leaves). The engine needs a deterministic answer, so the
//! policy is explicit and configurable:
//!
//! - `NoElimination` (default): a tied round eliminates nobody but still
//!   consumes one of the configured voting rounds.
//! - `FirstInPlayerOrder`: the tied candidate seated earliest is eliminated.

use serde::{Deserialize, Serialize};

/// Rule applied when two or more candidates share the highest vote count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakPolicy {
    /// Nobody is eliminated on a tie
    #[default]
    NoElimination,

    /// Eliminate the tied candidate with the lowest seat index
    FirstInPlayerOrder,
}

impl TieBreakPolicy {
    /// Get a human-readable description of this policy
    pub fn description(&self) -> &'static str {
        match self {
            TieBreakPolicy::NoElimination => "no elimination on a tie",
            TieBreakPolicy::FirstInPlayerOrder => "eliminate the first tied player in seat order",
        }
    }
}

impl std::fmt::Display for TieBreakPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for TieBreakPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "none" | "no_elimination" => Ok(TieBreakPolicy::NoElimination),
            "first" | "first_in_player_order" | "first_in_order" => {
                Ok(TieBreakPolicy::FirstInPlayerOrder)
            }
            _ => Err(format!(
                "Unknown tie-break policy: {}. Valid: no-elimination, first-in-player-order",
                s
            )),
        }
    }
}
