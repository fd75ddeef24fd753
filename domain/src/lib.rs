//! Domain layer for the Imposter game engine
//!
//! This crate contains the game rules, entities, and value objects.
//! It has no dependencies on infrastructure, async runtimes, or presentation.
//!
//! # Core Concepts
//!
//! ## Game
//!
//! A [`Game`] seats `Player_1..Player_N`. Most players know a secret word;
//! a fixed number of imposters only know its category. Players give one-word
//! clues over several rounds, then vote to eliminate suspects.
//!
//! ## Incremental visibility
//!
//! Calls are strictly sequential. The [`ClueContext`] / [`VoteContext`] a
//! player receives contains exactly the clues and votes recorded before it.
//!
//! ## Event stream
//!
//! Every state change is published as a [`GameEvent`]. Folding the stream
//! with [`GameReplay`] reconstructs the final state.

pub mod config;
pub mod core;
pub mod event;
pub mod game;
pub mod prompt;
pub mod response;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::DomainError,
    model::{ModelEntry, ModelKey, ModelRegistry},
};
pub use event::{GameEvent, GameReplay, ReplayError, RosterEntry};
pub use game::{
    CastVote, Clue, ClueContext, Elimination, Game, GameConfig, GamePhase, GameResult, MIN_PLAYERS,
    ModelStrategy, Player, PlayerId, PublicClue, Role, RoleAssignment, TallyOutcome,
    TieBreakPolicy, Vote, VoteContext, VoteTally, WinCheck, Winner,
};
pub use prompt::{ChatMessage, ChatRole, PromptTemplate};
pub use response::{
    ClueResponse, ClueViolation, FALLBACK_CLUE, FALLBACK_TARGET, ParseError, ResponseSchema,
    SchemaViolation, VoteResponse, parse_response, sanitize, validate_clue,
};
