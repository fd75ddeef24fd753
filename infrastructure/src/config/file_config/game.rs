//! Game configuration from TOML (`[game]` section)

use imposter_domain::{
    ConfigIssue, ConfigIssueCode, GameConfig, MIN_PLAYERS, ModelStrategy, RoleAssignment,
    TieBreakPolicy,
};
use serde::{Deserialize, Serialize};

/// Raw game configuration from TOML
///
/// # Example
///
/// ```toml
/// [game]
/// word = "beach"
/// category = "nature"
/// players = 6
/// imposters = 2
/// clue_rounds = 3
/// voting_rounds = 2
/// tie_break = "first_in_player_order"
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGameConfig {
    /// Secret word (usually given on the command line)
    pub word: Option<String>,
    pub category: Option<String>,
    pub players: usize,
    pub imposters: usize,
    pub clue_rounds: u32,
    pub voting_rounds: u32,
    pub tie_break: TieBreakPolicy,
    /// Fixes the role and model deal
    pub seed: Option<u64>,
}

impl Default for FileGameConfig {
    fn default() -> Self {
        Self {
            word: None,
            category: None,
            players: 8,
            imposters: 2,
            clue_rounds: 3,
            voting_rounds: 2,
            tie_break: TieBreakPolicy::default(),
            seed: None,
        }
    }
}

impl FileGameConfig {
    /// Check the counts against the game rules
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let mut invalid = |message: String| {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidGameCounts,
                message,
            ))
        };

        if self.players < MIN_PLAYERS {
            invalid(format!(
                "game.players: at least {} players required (got {})",
                MIN_PLAYERS, self.players
            ));
        }
        if self.imposters == 0 || self.imposters >= self.players {
            invalid(format!(
                "game.imposters: must be at least 1 and fewer than players (got {})",
                self.imposters
            ));
        }
        if self.clue_rounds == 0 {
            invalid("game.clue_rounds: at least 1 clue round required".to_string());
        }
        if self.voting_rounds == 0 || self.voting_rounds as usize > self.imposters {
            invalid(format!(
                "game.voting_rounds: must be between 1 and imposters ({}) (got {})",
                self.imposters, self.voting_rounds
            ));
        }
        issues
    }

    /// Build the domain configuration
    pub fn to_game_config(
        &self,
        word: impl Into<String>,
        category: impl Into<String>,
        model_strategy: ModelStrategy,
    ) -> GameConfig {
        GameConfig::new(word, category)
            .with_players(self.players, self.imposters)
            .with_rounds(self.clue_rounds, self.voting_rounds)
            .with_tie_break(self.tie_break)
            .with_model_strategy(model_strategy)
            .with_role_assignment(RoleAssignment::Random { seed: self.seed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_counts_are_valid() {
        assert!(FileGameConfig::default().validate().is_empty());
    }

    #[test]
    fn test_reports_every_bad_count() {
        let config = FileGameConfig {
            players: 2,
            imposters: 2,
            clue_rounds: 0,
            voting_rounds: 3,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 4);
        assert!(issues.iter().all(|i| i.is_error()));
    }

    #[test]
    fn test_to_game_config() {
        let config = FileGameConfig {
            players: 5,
            imposters: 1,
            voting_rounds: 1,
            seed: Some(7),
            tie_break: TieBreakPolicy::FirstInPlayerOrder,
            ..Default::default()
        };
        let game = config.to_game_config("beach", "nature", ModelStrategy::single("llama"));
        assert_eq!(game.num_players, 5);
        assert_eq!(game.num_voting_rounds, 1);
        assert_eq!(game.tie_break, TieBreakPolicy::FirstInPlayerOrder);
        assert_eq!(game.role_assignment, RoleAssignment::Random { seed: Some(7) });
    }
}
