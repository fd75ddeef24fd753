//! Prompt domain
//!
//! Chat message types and the default wording for clue and vote calls.

pub mod message;
mod template;

pub use message::{ChatMessage, ChatRole};
pub use template::PromptTemplate;
