//! Players, roles and what each player knows

use crate::core::error::DomainError;
use crate::core::model::ModelKey;
use serde::{Deserialize, Serialize};

/// Stable player identifier, unique within a game (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Seat-based identifier: index 0 becomes `Player_1`
    pub fn from_seat(index: usize) -> Self {
        Self(format!("Player_{}", index + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Role a player is dealt at setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Does not know the secret word
    Imposter,
    /// Holds the secret word (civilian)
    NonImposter,
}

impl Role {
    pub fn is_imposter(&self) -> bool {
        matches!(self, Role::Imposter)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Imposter => "imposter",
            Role::NonImposter => "non_imposter",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A clue as remembered by the player who gave it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GivenClue {
    pub round: u32,
    pub text: String,
}

/// A participant in the game (Entity)
///
/// Created at setup, never removed. Only the controller owning the active
/// phase mutates it: the clue controller appends clues, the voting
/// controller marks the elimination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    model: ModelKey,
    role: Role,
    secret_word: Option<String>,
    clues_given: Vec<GivenClue>,
    /// Raw structured answers this player produced, replayed into its later prompts
    answers: Vec<String>,
    eliminated_in: Option<u32>,
}

impl Player {
    /// Create a player. The secret word is only kept for non-imposters.
    pub fn new(id: PlayerId, model: ModelKey, role: Role, secret_word: impl Into<String>) -> Self {
        let secret_word = match role {
            Role::NonImposter => Some(secret_word.into()),
            Role::Imposter => None,
        };
        Self {
            id,
            model,
            role,
            secret_word,
            clues_given: Vec::new(),
            answers: Vec::new(),
            eliminated_in: None,
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn model(&self) -> &ModelKey {
        &self.model
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_imposter(&self) -> bool {
        self.role.is_imposter()
    }

    /// The secret word, or `None` for imposters
    pub fn secret_word(&self) -> Option<&str> {
        self.secret_word.as_deref()
    }

    pub fn clues_given(&self) -> &[GivenClue] {
        &self.clues_given
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn eliminated_in(&self) -> Option<u32> {
        self.eliminated_in
    }

    pub fn is_active(&self) -> bool {
        self.eliminated_in.is_none()
    }

    pub(crate) fn record_clue(&mut self, round: u32, text: impl Into<String>) {
        self.clues_given.push(GivenClue {
            round,
            text: text.into(),
        });
    }

    pub(crate) fn remember_answer(&mut self, answer: impl Into<String>) {
        self.answers.push(answer.into());
    }

    pub(crate) fn eliminate(&mut self, voting_round: u32) -> Result<(), DomainError> {
        if self.eliminated_in.is_some() {
            return Err(DomainError::PlayerEliminated(self.id.to_string()));
        }
        self.eliminated_in = Some(voting_round);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_ids() {
        assert_eq!(PlayerId::from_seat(0).as_str(), "Player_1");
        assert_eq!(PlayerId::from_seat(7).as_str(), "Player_8");
    }

    #[test]
    fn test_imposter_never_holds_word() {
        let imposter = Player::new(
            PlayerId::from_seat(0),
            ModelKey::new("llama"),
            Role::Imposter,
            "lighthouse",
        );
        assert_eq!(imposter.secret_word(), None);

        let civilian = Player::new(
            PlayerId::from_seat(1),
            ModelKey::new("llama"),
            Role::NonImposter,
            "lighthouse",
        );
        assert_eq!(civilian.secret_word(), Some("lighthouse"));
    }

    #[test]
    fn test_eliminate_once() {
        let mut player = Player::new(
            PlayerId::from_seat(0),
            ModelKey::new("llama"),
            Role::NonImposter,
            "lighthouse",
        );
        assert!(player.is_active());
        player.eliminate(1).unwrap();
        assert!(!player.is_active());
        assert_eq!(player.eliminated_in(), Some(1));
        assert_eq!(
            player.eliminate(2),
            Err(DomainError::PlayerEliminated("Player_1".to_string()))
        );
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(
            serde_json::to_string(&Role::NonImposter).unwrap(),
            "\"non_imposter\""
        );
        assert_eq!(serde_json::to_string(&Role::Imposter).unwrap(), "\"imposter\"");
    }
}
