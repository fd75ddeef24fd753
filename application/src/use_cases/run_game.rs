//! Run Game use case
//!
//! Drives a full game: SETUP, every clue round, voting rounds until the
//! outcome is decided or the budget runs out, then RESULT.

use super::call_agent::CallAgentUseCase;
use super::clue_round::ClueRoundController;
use super::voting_round::VotingRoundController;
use crate::config::CallPolicy;
use crate::ports::agent_backend::AgentBackend;
use crate::ports::event_sink::{EventSink, NoEvents};
use crate::ports::prompt_builder::{DefaultPrompts, PromptBuilder};
use imposter_domain::{
    DomainError, Game, GameConfig, GameEvent, GameResult, ModelRegistry, RoleAssignment,
    RosterEntry,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can end a game run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunGameError {
    /// The game never started
    #[error("Configuration error: {0}")]
    Configuration(DomainError),

    /// The engine broke one of its own rules mid-game
    #[error("Game engine error: {0}")]
    Engine(#[from] DomainError),
}

impl RunGameError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, RunGameError::Configuration(_))
    }
}

/// Input for the RunGame use case
#[derive(Debug, Clone)]
pub struct RunGameInput {
    pub config: GameConfig,
    /// Short model keys to backend model ids
    pub registry: ModelRegistry,
}

impl RunGameInput {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            registry: ModelRegistry::with_defaults(),
        }
    }

    pub fn with_registry(mut self, registry: ModelRegistry) -> Self {
        self.registry = registry;
        self
    }
}

/// Use case for running one game to completion
pub struct RunGameUseCase<B: AgentBackend + 'static> {
    client: CallAgentUseCase<B>,
    prompts: Arc<dyn PromptBuilder>,
}

impl<B: AgentBackend + 'static> RunGameUseCase<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self::with_policy(backend, CallPolicy::default())
    }

    pub fn with_policy(backend: Arc<B>, policy: CallPolicy) -> Self {
        Self {
            client: CallAgentUseCase::new(backend, policy),
            prompts: Arc::new(DefaultPrompts),
        }
    }

    /// Replace the default prompt templates
    pub fn with_prompts(mut self, prompts: Arc<dyn PromptBuilder>) -> Self {
        self.prompts = prompts;
        self
    }

    /// Execute the use case without observers
    pub async fn execute(&self, input: RunGameInput) -> Result<GameResult, RunGameError> {
        self.execute_with_events(input, &NoEvents).await
    }

    /// Execute the use case, publishing every state change to `events`
    ///
    /// The stream always ends with exactly one `game_complete` or `error`.
    pub async fn execute_with_events(
        &self,
        input: RunGameInput,
        events: &dyn EventSink,
    ) -> Result<GameResult, RunGameError> {
        let RunGameInput { config, registry } = input;

        let mut rng = match &config.role_assignment {
            RoleAssignment::Random { seed: Some(seed) } => StdRng::seed_from_u64(*seed),
            _ => StdRng::from_os_rng(),
        };
        let mut game = match Game::setup(config, &registry, &mut rng) {
            Ok(game) => game,
            Err(e) => {
                warn!("Game setup rejected: {}", e);
                events.emit(&GameEvent::error(e.to_string()));
                return Err(RunGameError::Configuration(e));
            }
        };

        match self.play(&mut game, &registry, events).await {
            Ok(result) => Ok(result),
            Err(e) => {
                warn!("Game aborted: {}", e);
                events.emit(&GameEvent::error(e.to_string()));
                Err(e)
            }
        }
    }

    async fn play(
        &self,
        game: &mut Game,
        registry: &ModelRegistry,
        events: &dyn EventSink,
    ) -> Result<GameResult, RunGameError> {
        let config = game.config().clone();
        info!(
            "Starting game: {} players, {} imposter(s), {} clue round(s), {} voting round(s)",
            config.num_players,
            config.num_imposters,
            config.num_clue_rounds,
            config.num_voting_rounds
        );
        debug!("Imposters: {:?}", game.imposters());

        events.emit(&GameEvent::GameStart {
            category: config.category.clone(),
            num_imposters: config.num_imposters,
            num_clue_rounds: config.num_clue_rounds,
            num_voting_rounds: config.num_voting_rounds,
            players: game
                .players()
                .iter()
                .map(|p| RosterEntry {
                    id: p.id().clone(),
                    model: p.model().clone(),
                })
                .collect(),
        });

        let prompts = self.prompts.as_ref();
        let clue_rounds = ClueRoundController::new(&self.client, registry, prompts, events);
        for round in 1..=config.num_clue_rounds {
            clue_rounds.run(game, round).await?;
        }

        let voting_rounds = VotingRoundController::new(&self.client, registry, prompts, events);
        for voting_round in 1..=config.num_voting_rounds {
            voting_rounds.run(game, voting_round).await?;

            let check = game.win_check();
            if check.voting_over() {
                if voting_round < config.num_voting_rounds {
                    info!(
                        "Outcome decided after voting round {}, skipping the rest",
                        voting_round
                    );
                }
                break;
            }
        }

        let result = game.finish()?;
        info!(
            "Game complete: {} win, detection accuracy {:.2}",
            result.winner, result.detection_accuracy
        );
        events.emit(&GameEvent::game_complete(&result));
        Ok(result)
    }
}
