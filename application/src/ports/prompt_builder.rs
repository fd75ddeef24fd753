//! Prompt builder port
//!
//! Prompt wording is a swappable collaborator. The engine hands a builder
//! the context snapshot for a call and sends whatever messages come back.

use imposter_domain::{ChatMessage, ClueContext, PromptTemplate, VoteContext};

pub trait PromptBuilder: Send + Sync {
    fn clue_messages(&self, ctx: &ClueContext) -> Vec<ChatMessage>;

    fn vote_messages(&self, ctx: &VoteContext) -> Vec<ChatMessage>;
}

/// Builder backed by the domain's default templates
pub struct DefaultPrompts;

impl PromptBuilder for DefaultPrompts {
    fn clue_messages(&self, ctx: &ClueContext) -> Vec<ChatMessage> {
        PromptTemplate::clue_messages(ctx)
    }

    fn vote_messages(&self, ctx: &VoteContext) -> Vec<ChatMessage> {
        PromptTemplate::vote_messages(ctx)
    }
}
