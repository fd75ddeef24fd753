//! Game configuration (validated at SETUP)

use super::tie_break::TieBreakPolicy;
use crate::core::error::DomainError;
use crate::core::model::{ModelKey, ModelRegistry};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minimum table size for the game to make sense
pub const MIN_PLAYERS: usize = 3;

/// How models are dealt to seats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ModelStrategy {
    /// Every player uses the same model
    Single { model: ModelKey },
    /// Pool built from `distribution`, padded with `default`, trimmed to the
    /// player count, then shuffled across seats
    Mixed {
        distribution: BTreeMap<ModelKey, usize>,
        default: ModelKey,
    },
    /// One model for imposters, another for civilians
    RoleBased {
        imposter: ModelKey,
        civilian: ModelKey,
    },
    /// Explicit model per seat, in seat order
    PerSeat { models: Vec<ModelKey> },
}

impl ModelStrategy {
    pub fn single(model: impl Into<ModelKey>) -> Self {
        ModelStrategy::Single {
            model: model.into(),
        }
    }

    /// Every model key this strategy may hand out
    pub fn referenced_keys(&self) -> Vec<&ModelKey> {
        match self {
            ModelStrategy::Single { model } => vec![model],
            ModelStrategy::Mixed {
                distribution,
                default,
            } => distribution.keys().chain(std::iter::once(default)).collect(),
            ModelStrategy::RoleBased { imposter, civilian } => vec![imposter, civilian],
            ModelStrategy::PerSeat { models } => models.iter().collect(),
        }
    }

    /// Deal a model to each seat. `imposter_seats` is only consulted by `RoleBased`.
    pub fn assign<R: Rng + ?Sized>(
        &self,
        num_players: usize,
        imposter_seats: &[usize],
        rng: &mut R,
    ) -> Vec<ModelKey> {
        match self {
            ModelStrategy::Single { model } => vec![model.clone(); num_players],
            ModelStrategy::Mixed {
                distribution,
                default,
            } => {
                let mut pool: Vec<ModelKey> = distribution
                    .iter()
                    .flat_map(|(key, count)| std::iter::repeat_n(key.clone(), *count))
                    .collect();
                while pool.len() < num_players {
                    pool.push(default.clone());
                }
                pool.truncate(num_players);
                pool.shuffle(rng);
                pool
            }
            ModelStrategy::RoleBased { imposter, civilian } => (0..num_players)
                .map(|seat| {
                    if imposter_seats.contains(&seat) {
                        imposter.clone()
                    } else {
                        civilian.clone()
                    }
                })
                .collect(),
            ModelStrategy::PerSeat { models } => models.clone(),
        }
    }
}

impl Default for ModelStrategy {
    fn default() -> Self {
        let distribution = [
            ("haiku", 2),
            ("gpt4o-mini", 2),
            ("gemini", 2),
            ("llama", 1),
            ("mistral", 1),
        ]
        .into_iter()
        .map(|(key, count)| (ModelKey::new(key), count))
        .collect();
        ModelStrategy::Mixed {
            distribution,
            default: ModelKey::new("gpt4o-mini"),
        }
    }
}

/// How imposters are chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RoleAssignment {
    /// Unbiased random sample of seats; a seed makes the deal reproducible
    Random { seed: Option<u64> },
    /// Explicit zero-based seat indices (replays and tests)
    Fixed { seats: Vec<usize> },
}

impl Default for RoleAssignment {
    fn default() -> Self {
        RoleAssignment::Random { seed: None }
    }
}

impl RoleAssignment {
    /// Pick exactly `num_imposters` seats out of `num_players`
    pub fn imposter_seats<R: Rng + ?Sized>(
        &self,
        num_players: usize,
        num_imposters: usize,
        rng: &mut R,
    ) -> Vec<usize> {
        let mut seats = match self {
            RoleAssignment::Random { .. } => {
                rand::seq::index::sample(rng, num_players, num_imposters).into_vec()
            }
            RoleAssignment::Fixed { seats } => seats.clone(),
        };
        seats.sort_unstable();
        seats
    }
}

/// Configuration surface consumed at game creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub word: String,
    pub category: String,
    pub num_players: usize,
    pub num_imposters: usize,
    pub num_clue_rounds: u32,
    pub num_voting_rounds: u32,
    #[serde(default)]
    pub tie_break: TieBreakPolicy,
    #[serde(default)]
    pub model_strategy: ModelStrategy,
    #[serde(default)]
    pub role_assignment: RoleAssignment,
}

impl GameConfig {
    /// Defaults from the original table: 8 players, 2 imposters, 3 clue rounds
    pub fn new(word: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            category: category.into(),
            num_players: 8,
            num_imposters: 2,
            num_clue_rounds: 3,
            num_voting_rounds: 2,
            tie_break: TieBreakPolicy::default(),
            model_strategy: ModelStrategy::default(),
            role_assignment: RoleAssignment::default(),
        }
    }

    pub fn with_players(mut self, num_players: usize, num_imposters: usize) -> Self {
        self.num_players = num_players;
        self.num_imposters = num_imposters;
        self
    }

    pub fn with_rounds(mut self, clue_rounds: u32, voting_rounds: u32) -> Self {
        self.num_clue_rounds = clue_rounds;
        self.num_voting_rounds = voting_rounds;
        self
    }

    pub fn with_tie_break(mut self, policy: TieBreakPolicy) -> Self {
        self.tie_break = policy;
        self
    }

    pub fn with_model_strategy(mut self, strategy: ModelStrategy) -> Self {
        self.model_strategy = strategy;
        self
    }

    pub fn with_role_assignment(mut self, assignment: RoleAssignment) -> Self {
        self.role_assignment = assignment;
        self
    }

    /// Validate the configuration against the injected model registry
    pub fn validate(&self, registry: &ModelRegistry) -> Result<(), DomainError> {
        let invalid = |msg: String| Err(DomainError::InvalidConfig(msg));

        if self.word.trim().is_empty() {
            return invalid("secret word must not be empty".to_string());
        }
        if self.category.trim().is_empty() {
            return invalid("category must not be empty".to_string());
        }
        if self.num_players < MIN_PLAYERS {
            return invalid(format!(
                "num_players must be at least {} (got {})",
                MIN_PLAYERS, self.num_players
            ));
        }
        if self.num_imposters == 0 || self.num_imposters >= self.num_players {
            return invalid(format!(
                "num_imposters must be between 1 and {} (got {})",
                self.num_players - 1,
                self.num_imposters
            ));
        }
        if self.num_clue_rounds == 0 {
            return invalid("num_clue_rounds must be at least 1".to_string());
        }
        if self.num_voting_rounds == 0 || self.num_voting_rounds as usize > self.num_imposters {
            return invalid(format!(
                "num_voting_rounds must be between 1 and num_imposters ({}) (got {})",
                self.num_imposters, self.num_voting_rounds
            ));
        }

        if let RoleAssignment::Fixed { seats } = &self.role_assignment {
            let mut sorted = seats.clone();
            sorted.sort_unstable();
            sorted.dedup();
            if sorted.len() != seats.len() {
                return invalid("fixed imposter seats must be distinct".to_string());
            }
            if seats.len() != self.num_imposters {
                return invalid(format!(
                    "expected {} fixed imposter seats, got {}",
                    self.num_imposters,
                    seats.len()
                ));
            }
            if let Some(seat) = seats.iter().find(|s| **s >= self.num_players) {
                return invalid(format!("imposter seat {} is out of range", seat));
            }
        }

        if let ModelStrategy::PerSeat { models } = &self.model_strategy
            && models.len() != self.num_players
        {
            return invalid(format!(
                "expected one model per player ({}), got {}",
                self.num_players,
                models.len()
            ));
        }

        for key in self.model_strategy.referenced_keys() {
            if !registry.contains(key) {
                return Err(DomainError::UnknownModel(key.to_string()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn registry() -> ModelRegistry {
        ModelRegistry::with_defaults()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::new("lighthouse", "places");
        assert!(config.validate(&registry()).is_ok());
    }

    #[test]
    fn test_rejects_bad_counts() {
        let reg = registry();
        let config = GameConfig::new("lighthouse", "places").with_players(2, 1);
        assert!(matches!(config.validate(&reg), Err(DomainError::InvalidConfig(_))));

        let config = GameConfig::new("lighthouse", "places").with_players(4, 4);
        assert!(config.validate(&reg).is_err());

        let config = GameConfig::new("lighthouse", "places").with_players(4, 0);
        assert!(config.validate(&reg).is_err());

        let config = GameConfig::new("lighthouse", "places")
            .with_players(6, 2)
            .with_rounds(1, 3);
        assert!(config.validate(&reg).is_err());

        let config = GameConfig::new("lighthouse", "places").with_rounds(0, 1);
        assert!(config.validate(&reg).is_err());

        let config = GameConfig::new("  ", "places");
        assert!(config.validate(&reg).is_err());
    }

    #[test]
    fn test_rejects_unknown_model_key() {
        let config = GameConfig::new("lighthouse", "places")
            .with_model_strategy(ModelStrategy::single("gpt-9"));
        assert_eq!(
            config.validate(&registry()),
            Err(DomainError::UnknownModel("gpt-9".to_string()))
        );
    }

    #[test]
    fn test_rejects_bad_fixed_seats() {
        let reg = registry();
        let base = GameConfig::new("lighthouse", "places").with_players(4, 1);

        let config = base
            .clone()
            .with_role_assignment(RoleAssignment::Fixed { seats: vec![4] });
        assert!(config.validate(&reg).is_err());

        let config = base
            .clone()
            .with_role_assignment(RoleAssignment::Fixed { seats: vec![0, 1] });
        assert!(config.validate(&reg).is_err());

        let config = base.with_role_assignment(RoleAssignment::Fixed { seats: vec![2] });
        assert!(config.validate(&reg).is_ok());
    }

    #[test]
    fn test_random_role_assignment_picks_exact_count() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let seats = RoleAssignment::Random { seed: None }.imposter_seats(8, 2, &mut rng);
            assert_eq!(seats.len(), 2);
            assert_ne!(seats[0], seats[1]);
            assert!(seats.iter().all(|s| *s < 8));
        }
    }

    #[test]
    fn test_seeded_assignment_is_reproducible() {
        let random = RoleAssignment::Random { seed: None };
        let a = random.imposter_seats(8, 3, &mut StdRng::seed_from_u64(42));
        let b = random.imposter_seats(8, 3, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_mixed_strategy_pads_and_trims() {
        let mut distribution = BTreeMap::new();
        distribution.insert(ModelKey::new("haiku"), 1);
        let strategy = ModelStrategy::Mixed {
            distribution,
            default: ModelKey::new("llama"),
        };
        let mut rng = StdRng::seed_from_u64(1);
        let models = strategy.assign(4, &[], &mut rng);
        assert_eq!(models.len(), 4);
        assert_eq!(models.iter().filter(|m| m.as_str() == "haiku").count(), 1);
        assert_eq!(models.iter().filter(|m| m.as_str() == "llama").count(), 3);

        let models = ModelStrategy::default().assign(3, &[], &mut rng);
        assert_eq!(models.len(), 3);
    }

    #[test]
    fn test_role_based_strategy() {
        let strategy = ModelStrategy::RoleBased {
            imposter: ModelKey::new("haiku"),
            civilian: ModelKey::new("llama"),
        };
        let models = strategy.assign(3, &[1], &mut StdRng::seed_from_u64(0));
        assert_eq!(
            models.iter().map(|m| m.as_str()).collect::<Vec<_>>(),
            vec!["llama", "haiku", "llama"]
        );
    }

    #[test]
    fn test_per_seat_strategy() {
        let strategy = ModelStrategy::PerSeat {
            models: vec![ModelKey::new("llama"), ModelKey::new("haiku"), ModelKey::new("llama")],
        };
        let models = strategy.assign(3, &[0], &mut StdRng::seed_from_u64(0));
        assert_eq!(models[1], ModelKey::new("haiku"));

        let config = GameConfig::new("beach", "nature")
            .with_players(4, 1)
            .with_rounds(1, 1)
            .with_model_strategy(strategy);
        assert!(matches!(
            config.validate(&registry()),
            Err(DomainError::InvalidConfig(_))
        ));
    }
}
