//! Voting Round Controller
//!
//! Drives one voting round: every active player casts one vote, in seat
//! order, seeing the votes cast before it. The round closes with a tally,
//! the tie-break policy, and at most one elimination.

use super::call_agent::{AgentCallOutcome, CallAgentUseCase};
use super::clue_round::{RAW_VALUE_MAX, report_invalid_outputs};
use super::run_game::RunGameError;
use crate::ports::agent_backend::{AgentBackend, AgentRequest};
use crate::ports::event_sink::EventSink;
use crate::ports::prompt_builder::PromptBuilder;
use imposter_domain::core::text::truncate;
use imposter_domain::{
    DomainError, Elimination, Game, GameEvent, GamePhase, ModelRegistry, PlayerId, ResponseSchema,
    Vote, VoteResponse,
};
use tracing::{debug, info, warn};

pub struct VotingRoundController<'a, B: AgentBackend + ?Sized> {
    client: &'a CallAgentUseCase<B>,
    registry: &'a ModelRegistry,
    prompts: &'a dyn PromptBuilder,
    events: &'a dyn EventSink,
}

impl<'a, B: AgentBackend + ?Sized> VotingRoundController<'a, B> {
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

    /// Run voting round `voting_round` and return its elimination record
    pub async fn run(
        &self,
        game: &mut Game,
        voting_round: u32,
    ) -> Result<Elimination, RunGameError> {
        game.advance(GamePhase::VotingRound(voting_round))?;
        info!(
            "Voting round {}/{}",
            voting_round,
            game.config().num_voting_rounds
        );
        self.events.emit(&GameEvent::VotingRoundStart {
            voting_round,
            total_voting_rounds: game.config().num_voting_rounds,
            eliminated_so_far: game.eliminated_players(),
        });

        for voter in game.active_players() {
            self.cast_vote(game, voting_round, &voter).await?;
        }

        let elimination = game.eliminate(game.config().tie_break)?;
        match &elimination.eliminated {
            Some(id) => info!(
                "{} eliminated ({}), {} imposter(s) remain",
                id,
                if elimination.was_imposter {
                    "imposter"
                } else {
                    "civilian"
                },
                elimination.remaining_imposters
            ),
            None if !elimination.tied.is_empty() => {
                info!("Tie between {:?}, nobody eliminated", elimination.tied)
            }
            None => info!("No counted votes, nobody eliminated"),
        }
        self.events.emit(&GameEvent::elimination(&elimination));
        self.events.emit(&GameEvent::VotingRoundEnd { voting_round });
        Ok(elimination)
    }

    async fn cast_vote(
        &self,
        game: &mut Game,
        voting_round: u32,
        voter: &PlayerId,
    ) -> Result<(), RunGameError> {
        let ctx = game.vote_context(voter)?;
        let model = game
            .player(voter)
            .map(|p| p.model().clone())
            .ok_or_else(|| DomainError::UnknownPlayer(voter.to_string()))?;

        self.events.emit(&GameEvent::PlayerVoting {
            voting_round,
            player_id: voter.clone(),
        });

        let request = AgentRequest {
            model_id: self.registry.resolve(&model)?.to_string(),
            messages: self.prompts.vote_messages(&ctx),
            schema_name: VoteResponse::NAME,
            schema: VoteResponse::json_schema(),
            temperature: self.client.policy().vote_temperature,
        };
        let outcome: AgentCallOutcome<VoteResponse> =
            self.client.execute_or_fallback(&request).await;
        report_invalid_outputs(self.events, voter, &outcome);

        let degraded = outcome.is_degraded();
        let response = outcome.value;

        let target = if degraded {
            None
        } else {
            if let Ok(answer) = serde_json::to_string(&response) {
                game.remember_answer(voter, answer)?;
            }
            let target = resolve_target(&response.target, &ctx.eligible_targets);
            if target.is_none() {
                warn!(
                    "{} voted for unknown player '{}', counting as abstention",
                    voter, response.target
                );
                self.events.emit(&GameEvent::ValidationError {
                    player_id: voter.clone(),
                    raw_value: truncate(&response.target, RAW_VALUE_MAX),
                    reason: "unknown_target".to_string(),
                });
            }
            target
        };

        let confidence = if degraded { 0 } else { response.confidence_pct() };
        let vote = Vote {
            voting_round,
            voter_id: voter.clone(),
            target,
            rationale: response.rationale,
            confidence,
            degraded,
        };
        debug!("{} votes for {:?}", voter, vote.target);
        let event_vote = vote.clone();
        game.record_vote(vote)?;
        self.events
            .emit(&GameEvent::vote(&event_vote, game.tally(voting_round)));
        Ok(())
    }
}

/// Match a free-text target against the eligible players
///
/// Accepts the exact id, any casing, and `Player 3` / `player-3` spellings.
pub fn resolve_target(raw: &str, eligible: &[PlayerId]) -> Option<PlayerId> {
    let normalized: String = raw
        .trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '.' | '`'))
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect::<String>()
        .to_lowercase();
    eligible
        .iter()
        .find(|id| id.as_str().to_lowercase() == normalized)
        .cloned()
}
