//! Clue Round Controller
//!
//! Drives one clue round: every active player, in seat order, one at a time.
//! Each call sees exactly the clues recorded before it, so calls are never
//! issued concurrently.

use super::call_agent::{AgentCallOutcome, CallAgentUseCase};
use super::run_game::RunGameError;
use crate::ports::agent_backend::{AgentBackend, AgentRequest};
use crate::ports::event_sink::EventSink;
use crate::ports::prompt_builder::PromptBuilder;
use imposter_domain::core::text::truncate;
use imposter_domain::{
    Clue, ClueResponse, DomainError, FALLBACK_CLUE, Game, GameEvent, GamePhase, ModelRegistry,
    PlayerId, ResponseSchema, validate_clue,
};
use tracing::{debug, info, warn};

/// Longest raw value copied into a `validation_error` event
pub(crate) const RAW_VALUE_MAX: usize = 500;

pub struct ClueRoundController<'a, B: AgentBackend + ?Sized> {
    client: &'a CallAgentUseCase<B>,
    registry: &'a ModelRegistry,
    prompts: &'a dyn PromptBuilder,
    events: &'a dyn EventSink,
}

impl<'a, B: AgentBackend + ?Sized> ClueRoundController<'a, B> {
    pub fn new(
        client: &'a CallAgentUseCase<B>,
        registry: &'a ModelRegistry,
        prompts: &'a dyn PromptBuilder,
        events: &'a dyn EventSink,
    ) -> Self {
        Self {
            client,
            registry,
            prompts,
            events,
        }
    }

    /// Run clue round `round` and return its clues in call order
    pub async fn run(&self, game: &mut Game, round: u32) -> Result<Vec<Clue>, RunGameError> {
        game.advance(GamePhase::ClueRound(round))?;
        info!("Clue round {}/{}", round, game.config().num_clue_rounds);
        self.events.emit(&GameEvent::RoundStart {
            round,
            total_rounds: game.config().num_clue_rounds,
        });

        let mut clues = Vec::new();
        for player_id in game.active_players() {
            clues.push(self.take_turn(game, round, &player_id).await?);
        }

        self.events.emit(&GameEvent::RoundEnd { round });
        Ok(clues)
    }

    async fn take_turn(
        &self,
        game: &mut Game,
        round: u32,
        player_id: &PlayerId,
    ) -> Result<Clue, RunGameError> {
        let ctx = game.clue_context(player_id)?;
        let player = game
            .player(player_id)
            .ok_or_else(|| DomainError::UnknownPlayer(player_id.to_string()))?;
        let (model, role) = (player.model().clone(), player.role());

        self.events.emit(&GameEvent::PlayerThinking {
            round,
            player_id: player_id.clone(),
        });

        let request = AgentRequest {
            model_id: self.registry.resolve(&model)?.to_string(),
            messages: self.prompts.clue_messages(&ctx),
            schema_name: ClueResponse::NAME,
            schema: ClueResponse::json_schema(),
            temperature: self.client.policy().clue_temperature,
        };
        let outcome: AgentCallOutcome<ClueResponse> =
            self.client.execute_or_fallback(&request).await;
        report_invalid_outputs(self.events, player_id, &outcome);

        let call_degraded = outcome.is_degraded();
        let response = outcome.value;

        // Only real answers are replayed into the player's later prompts
        if !call_degraded && let Ok(answer) = serde_json::to_string(&response) {
            game.remember_answer(player_id, answer)?;
        }

        let (text, confidence, degraded) = if call_degraded {
            (FALLBACK_CLUE.to_string(), 0, true)
        } else {
            match validate_clue(&response.clue, &game.config().word) {
                Ok(clean) => (clean, response.confidence_pct(), false),
                Err(violation) => {
                    warn!(
                        "{} gave an invalid clue ({}), using placeholder",
                        player_id,
                        violation.reason()
                    );
                    self.events.emit(&GameEvent::ValidationError {
                        player_id: player_id.clone(),
                        raw_value: truncate(&response.clue, RAW_VALUE_MAX),
                        reason: violation.reason().to_string(),
                    });
                    (FALLBACK_CLUE.to_string(), 0, true)
                }
            }
        };

        let recorded = game
            .record_clue(Clue {
                round,
                player_id: player_id.clone(),
                text,
                rationale: response.rationale,
                confidence,
                word_hypothesis: response.word_hypothesis,
                degraded,
            })?
            .clone();

        debug!("{} ({}) clue: {}", player_id, role, recorded.text);
        self.events.emit(&GameEvent::clue(&recorded, role));
        Ok(recorded)
    }
}

/// Publish every rejected raw answer of a call
pub(crate) fn report_invalid_outputs<T>(
    events: &dyn EventSink,
    player_id: &PlayerId,
    outcome: &AgentCallOutcome<T>,
) {
    for invalid in &outcome.invalid_outputs {
        events.emit(&GameEvent::ValidationError {
            player_id: player_id.clone(),
            raw_value: truncate(&invalid.raw, RAW_VALUE_MAX),
            reason: invalid.error.to_string(),
        });
    }
}
