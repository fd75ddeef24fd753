//! Default prompt wording for clue and vote calls
//!
//! Wording is swappable: the application layer only depends on a
//! `PromptBuilder`, and these templates are what the default builder uses.

use super::message::ChatMessage;
use crate::game::{ClueContext, PublicClue, VoteContext};

/// Templates for generating prompts for each call kind
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for a player who knows the word
    pub fn civilian_system(
        player_id: &str,
        word: &str,
        category: &str,
        total_players: usize,
        num_imposters: usize,
    ) -> String {
        format!(
            r#"You are {player_id} in a game of Imposter.

You KNOW the secret word: "{word}" (category: {category}).
There are {total_players} players and {num_imposters} of them are imposters who only know the category.

Give one-word clues that prove to other word-holders that you know the word,
without making it easy for an imposter to guess it. Never say the word itself.
Watch the other clues: generic or slightly-off clues suggest an imposter.

Always answer with a single JSON object."#
        )
    }

    /// System prompt for an imposter
    pub fn imposter_system(
        player_id: &str,
        category: &str,
        total_players: usize,
        num_imposters: usize,
    ) -> String {
        format!(
            r#"You are {player_id} in a game of Imposter.

You are an IMPOSTER. You do NOT know the secret word, only its category: {category}.
There are {total_players} players and {num_imposters} imposters (you included).

Work out the word from the other players' clues and give clues that make you
look like you know it. Commit to a hypothesis; vague clues give you away.

Always answer with a single JSON object."#
        )
    }

    /// System message for a clue call
    pub fn clue_system(ctx: &ClueContext) -> String {
        match &ctx.secret_word {
            Some(word) => Self::civilian_system(
                ctx.player_id.as_str(),
                word,
                &ctx.category,
                ctx.total_players,
                ctx.num_imposters,
            ),
            None => Self::imposter_system(
                ctx.player_id.as_str(),
                &ctx.category,
                ctx.total_players,
                ctx.num_imposters,
            ),
        }
    }

    /// Rendered clue history, one line per clue
    pub fn clue_history(clues: &[PublicClue]) -> String {
        if clues.is_empty() {
            return "No clues yet. You are first.".to_string();
        }
        clues
            .iter()
            .map(|c| format!("Round {} - {}: \"{}\"", c.round, c.player_id, c.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// User message for a clue call
    pub fn clue_prompt(ctx: &ClueContext) -> String {
        let mut prompt = format!(
            "=== CLUE ROUND {} of {} ===\n\nClues so far:\n{}\n\n",
            ctx.round,
            ctx.total_rounds,
            Self::clue_history(&ctx.visible_clues)
        );

        if ctx.is_imposter() {
            prompt.push_str(
                r#"Reply with JSON:
{"rationale": "<your reasoning, at least 10 characters>", "clue": "<one word>", "confidence": <0-100>, "word_hypothesis": "<your best guess of the word>"}"#,
            );
        } else {
            prompt.push_str(
                r#"Reply with JSON:
{"rationale": "<your reasoning, at least 10 characters>", "clue": "<one word>", "confidence": <0-100>, "word_hypothesis": null}"#,
            );
        }
        prompt
    }

    /// User message for a vote call
    pub fn vote_prompt(ctx: &VoteContext) -> String {
        let mut prompt = format!(
            "=== VOTING ROUND {} of {} ===\n\nAll clues:\n{}\n\n",
            ctx.voting_round,
            ctx.total_voting_rounds,
            Self::clue_history(&ctx.clue_history)
        );

        if !ctx.eliminated.is_empty() {
            let names: Vec<&str> = ctx.eliminated.iter().map(|p| p.as_str()).collect();
            prompt.push_str(&format!("Already eliminated: {}\n\n", names.join(", ")));
        }

        if ctx.votes_so_far.is_empty() {
            prompt.push_str("No votes cast yet in this round.\n\n");
        } else {
            prompt.push_str("Votes so far this round:\n");
            for vote in &ctx.votes_so_far {
                let target = vote
                    .target
                    .as_ref()
                    .map(|t| t.as_str())
                    .unwrap_or("abstained");
                prompt.push_str(&format!("- {} -> {}\n", vote.voter_id, target));
            }
            prompt.push('\n');
        }

        let targets: Vec<&str> = ctx.eligible_targets.iter().map(|p| p.as_str()).collect();
        prompt.push_str(&format!(
            "Vote for exactly ONE player you believe is an imposter. Valid targets: {}\n\n",
            targets.join(", ")
        ));
        prompt.push_str(
            r#"Reply with JSON:
{"rationale": "<why, at least 20 characters>", "target": "<Player_N>", "confidence": <0-100>}"#,
        );
        prompt
    }

    /// Full message list for a clue call, replaying the player's own answers
    pub fn clue_messages(ctx: &ClueContext) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::system(Self::clue_system(ctx))];
        messages.extend(ctx.own_answers.iter().map(ChatMessage::assistant));
        messages.push(ChatMessage::user(Self::clue_prompt(ctx)));
        messages
    }

    /// Full message list for a vote call
    pub fn vote_messages(ctx: &VoteContext) -> Vec<ChatMessage> {
        let system = match &ctx.secret_word {
            Some(word) => Self::civilian_system(
                ctx.player_id.as_str(),
                word,
                &ctx.category,
                ctx.eligible_targets.len() + ctx.eliminated.len(),
                ctx.num_imposters,
            ),
            None => Self::imposter_system(
                ctx.player_id.as_str(),
                &ctx.category,
                ctx.eligible_targets.len() + ctx.eliminated.len(),
                ctx.num_imposters,
            ),
        };
        let mut messages = vec![ChatMessage::system(system)];
        messages.extend(ctx.own_answers.iter().map(ChatMessage::assistant));
        messages.push(ChatMessage::user(Self::vote_prompt(ctx)));
        messages
    }
}
