//! Game domain: roster, clue and vote logs, tally, eliminations, outcome

pub mod clue;
pub mod config;
pub mod context;
pub mod elimination;
pub mod outcome;
pub mod phase;
pub mod player;
pub mod state;
pub mod tie_break;
pub mod vote;

pub use clue::{Clue, PublicClue};
pub use config::{GameConfig, MIN_PLAYERS, ModelStrategy, RoleAssignment};
pub use context::{CastVote, ClueContext, VoteContext};
pub use elimination::Elimination;
pub use outcome::{GameResult, WinCheck, Winner, detection_accuracy};
pub use phase::GamePhase;
pub use player::{GivenClue, Player, PlayerId, Role};
pub use state::Game;
pub use tie_break::TieBreakPolicy;
pub use vote::{TallyOutcome, Vote, VoteTally};
