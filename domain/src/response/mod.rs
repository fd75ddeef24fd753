//! Structured agent responses
//!
//! Raw model text goes through three separate stages:
//! [`sanitize`] -> deserialize into a [`ResponseSchema`] record -> validate.
//! Clue text is then checked against the game's content rules
//! ([`validate_clue`]).

pub mod clue;
pub mod content;
pub mod sanitize;
pub mod schema;
pub mod vote;

pub use clue::{ClueResponse, FALLBACK_CLUE};
pub use content::{ClueViolation, validate_clue};
pub use sanitize::sanitize;
pub use schema::{ParseError, ResponseSchema, SchemaViolation, parse_response};
pub use vote::{FALLBACK_TARGET, VoteResponse};
