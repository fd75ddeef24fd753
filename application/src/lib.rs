//! Application layer for the Imposter game engine
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::CallPolicy;
pub use ports::{
    agent_backend::{AgentBackend, AgentRequest, BackendError},
    event_sink::{ChannelEventSink, CompositeEventSink, EventSink, MemoryEventSink, NoEvents},
    prompt_builder::{DefaultPrompts, PromptBuilder},
};
pub use use_cases::call_agent::{AgentCallError, AgentCallOutcome, CallAgentUseCase};
pub use use_cases::clue_round::ClueRoundController;
pub use use_cases::run_game::{RunGameError, RunGameInput, RunGameUseCase};
pub use use_cases::voting_round::VotingRoundController;
