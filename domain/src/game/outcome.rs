//! Win condition and final game result

use super::clue::Clue;
use super::elimination::Elimination;
use super::player::{Player, PlayerId};
use super::vote::Vote;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which side won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    /// Every imposter was eliminated
    Civilians,
    /// At least one imposter survived
    Imposters,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::Civilians => "civilians",
            Winner::Imposters => "imposters",
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of the win condition at some point in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinCheck {
    pub eliminated_imposters: Vec<PlayerId>,
    pub surviving_imposters: Vec<PlayerId>,
    pub surviving_civilians: usize,
}

impl WinCheck {
    /// Evaluate the win condition over the current roster
    pub fn evaluate(players: &[Player]) -> Self {
        let mut eliminated_imposters = Vec::new();
        let mut surviving_imposters = Vec::new();
        let mut surviving_civilians = 0;
        for player in players {
            match (player.is_imposter(), player.is_active()) {
                (true, true) => surviving_imposters.push(player.id().clone()),
                (true, false) => eliminated_imposters.push(player.id().clone()),
                (false, true) => surviving_civilians += 1,
                (false, false) => {}
            }
        }
        Self {
            eliminated_imposters,
            surviving_imposters,
            surviving_civilians,
        }
    }

    pub fn all_imposters_caught(&self) -> bool {
        self.surviving_imposters.is_empty()
    }

    /// Surviving imposters can no longer be outvoted
    pub fn imposters_at_parity(&self) -> bool {
        !self.surviving_imposters.is_empty()
            && self.surviving_imposters.len() >= self.surviving_civilians
    }

    /// Further voting rounds would not change the outcome
    pub fn voting_over(&self) -> bool {
        self.all_imposters_caught() || self.imposters_at_parity()
    }

    pub fn winner(&self) -> Winner {
        if self.all_imposters_caught() {
            Winner::Civilians
        } else {
            Winner::Imposters
        }
    }
}

/// Fraction of actual imposters found among the eliminated players
pub fn detection_accuracy(actual_imposters: &[PlayerId], eliminated: &[PlayerId]) -> f64 {
    if actual_imposters.is_empty() {
        return 0.0;
    }
    let eliminated: HashSet<&PlayerId> = eliminated.iter().collect();
    let caught = actual_imposters
        .iter()
        .filter(|id| eliminated.contains(id))
        .count();
    caught as f64 / actual_imposters.len() as f64
}

/// Final game result (immutable once computed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub word: String,
    pub category: String,
    pub actual_imposters: Vec<PlayerId>,
    /// Eliminated players in elimination order
    pub eliminated_players: Vec<PlayerId>,
    pub detection_accuracy: f64,
    pub total_clue_rounds: u32,
    pub winner: Winner,
    pub clues: Vec<Clue>,
    pub votes: Vec<Vote>,
    pub eliminations: Vec<Elimination>,
}

impl GameResult {
    pub fn civilians_won(&self) -> bool {
        self.winner == Winner::Civilians
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ModelKey;
    use crate::game::player::Role;

    fn roster(imposters: &[usize], eliminated: &[usize], n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| {
                let role = if imposters.contains(&i) {
                    Role::Imposter
                } else {
                    Role::NonImposter
                };
                let mut p =
                    Player::new(PlayerId::from_seat(i), ModelKey::new("llama"), role, "harbor");
                if eliminated.contains(&i) {
                    p.eliminate(1).unwrap();
                }
                p
            })
            .collect()
    }

    #[test]
    fn test_civilians_win_when_all_imposters_out() {
        let check = WinCheck::evaluate(&roster(&[1], &[1], 4));
        assert!(check.all_imposters_caught());
        assert!(check.voting_over());
        assert_eq!(check.winner(), Winner::Civilians);
    }

    #[test]
    fn test_imposters_win_on_survival() {
        let check = WinCheck::evaluate(&roster(&[0, 3], &[3], 6));
        assert!(!check.all_imposters_caught());
        assert_eq!(check.winner(), Winner::Imposters);
        assert_eq!(check.surviving_imposters, vec![PlayerId::from("Player_1")]);
    }

    #[test]
    fn test_parity_ends_voting() {
        // 2 imposters vs 2 civilians left after two civilians were eliminated
        let check = WinCheck::evaluate(&roster(&[0, 1], &[2, 3], 6));
        assert!(check.imposters_at_parity());
        assert!(check.voting_over());

        let check = WinCheck::evaluate(&roster(&[0, 1], &[2], 6));
        assert!(!check.imposters_at_parity());
        assert!(!check.voting_over());
    }

    #[test]
    fn test_detection_accuracy() {
        let p = |id: &str| PlayerId::from(id);
        let imposters = vec![p("Player_1"), p("Player_4")];
        assert_eq!(detection_accuracy(&imposters, &[]), 0.0);
        assert_eq!(detection_accuracy(&imposters, &[p("Player_2"), p("Player_4")]), 0.5);
        assert_eq!(detection_accuracy(&imposters, &[p("Player_4"), p("Player_1")]), 1.0);
        assert_eq!(detection_accuracy(&[], &[p("Player_1")]), 0.0);
    }
}
