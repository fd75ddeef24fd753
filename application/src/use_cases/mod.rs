//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod call_agent;
pub mod clue_round;
pub mod run_game;
pub mod voting_round;

#[cfg(test)]
pub(crate) mod test_support;
