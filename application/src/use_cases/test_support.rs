//! Scripted collaborators for use case tests

use crate::config::CallPolicy;
use crate::ports::agent_backend::{AgentBackend, AgentRequest, BackendError};
use crate::ports::prompt_builder::{DefaultPrompts, PromptBuilder};
use async_trait::async_trait;
use imposter_domain::{
    ChatMessage, ChatRole, ClueContext, ClueResponse, ResponseSchema, VoteContext,
};
use std::sync::Mutex;
use std::time::Duration;

type Responder = Box<dyn Fn(&str, u32) -> Result<String, BackendError> + Send + Sync>;

/// One call as seen by the backend
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScriptedCall {
    pub player: String,
    pub round: u32,
    pub schema_name: &'static str,
}

/// Backend that answers by player id and round, parsed from the prompt
pub(crate) struct ScriptedBackend {
    clue: Responder,
    vote: Responder,
    calls: Mutex<Vec<ScriptedCall>>,
}

impl ScriptedBackend {
    pub fn new(
        clue: impl Fn(&str, u32) -> Result<String, BackendError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            clue: Box::new(clue),
            vote: Box::new(|_, _| Err(BackendError::EmptyResponse)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_votes(
        mut self,
        vote: impl Fn(&str, u32) -> Result<String, BackendError> + Send + Sync + 'static,
    ) -> Self {
        self.vote = Box::new(vote);
        self
    }

    pub fn calls(&self) -> Vec<ScriptedCall> {
        self.calls.lock().unwrap().clone()
    }
}

fn speaker(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .find(|m| m.role == ChatRole::System)
        .and_then(|m| m.content.strip_prefix("You are "))
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap_or_default()
        .to_string()
}

fn round(messages: &[ChatMessage]) -> u32 {
    messages
        .iter()
        .rev()
        .find(|m| m.role == ChatRole::User)
        .and_then(|m| m.content.split("ROUND ").nth(1))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|n| n.parse().ok())
        .unwrap_or_default()
}

#[async_trait]
impl AgentBackend for ScriptedBackend {
    async fn invoke(&self, request: &AgentRequest) -> Result<String, BackendError> {
        let call = ScriptedCall {
            player: speaker(&request.messages),
            round: round(&request.messages),
            schema_name: request.schema_name,
        };
        self.calls.lock().unwrap().push(call.clone());

        if call.schema_name == ClueResponse::NAME {
            (self.clue)(&call.player, call.round)
        } else {
            (self.vote)(&call.player, call.round)
        }
    }
}

/// Prompt builder that keeps every context it was handed
#[derive(Default)]
pub(crate) struct RecordingPrompts {
    clues: Mutex<Vec<ClueContext>>,
    votes: Mutex<Vec<VoteContext>>,
}

impl RecordingPrompts {
    pub fn clue_contexts(&self) -> Vec<ClueContext> {
        self.clues.lock().unwrap().clone()
    }

    pub fn vote_contexts(&self) -> Vec<VoteContext> {
        self.votes.lock().unwrap().clone()
    }
}

impl PromptBuilder for RecordingPrompts {
    fn clue_messages(&self, ctx: &ClueContext) -> Vec<ChatMessage> {
        self.clues.lock().unwrap().push(ctx.clone());
        DefaultPrompts.clue_messages(ctx)
    }

    fn vote_messages(&self, ctx: &VoteContext) -> Vec<ChatMessage> {
        self.votes.lock().unwrap().push(ctx.clone());
        DefaultPrompts.vote_messages(ctx)
    }
}

pub(crate) fn clue_json(clue: &str) -> Result<String, BackendError> {
    Ok(format!(
        r#"{{"rationale": "Fits the category well", "clue": "{}", "confidence": 70, "word_hypothesis": null}}"#,
        clue
    ))
}

pub(crate) fn vote_json(target: &str) -> Result<String, BackendError> {
    Ok(format!(
        r#"{{"rationale": "Their clue did not fit the others", "target": "{}", "confidence": 60}}"#,
        target
    ))
}

/// Default policy with no backoff
pub(crate) fn fast_policy() -> CallPolicy {
    CallPolicy::default().with_backoff_base(Duration::ZERO)
}
