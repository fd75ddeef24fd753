//! Rebuild game state by folding over the ordered event stream

use super::game_event::{GameEvent, RosterEntry};
use crate::game::{Clue, Elimination, GameResult, PlayerId, Vote, VoteTally};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("Event '{0}' arrived before game_start")]
    NotStarted(&'static str),

    #[error("Event '{0}' arrived after the stream ended")]
    AfterTerminal(&'static str),

    #[error("Duplicate game_start")]
    DuplicateStart,
}

/// State derived purely from events
///
/// # Example
///
/// ```
/// use imposter_domain::event::{GameEvent, GameReplay};
///
/// let replay = GameReplay::from_events(&[
///     GameEvent::GameStart {
///         category: "places".into(),
///         num_imposters: 1,
///         num_clue_rounds: 1,
///         num_voting_rounds: 1,
///         players: vec![],
///     },
///     GameEvent::RoundStart { round: 1, total_rounds: 1 },
/// ])
/// .unwrap();
/// assert_eq!(replay.current_round(), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameReplay {
    started: bool,
    finished: bool,
    category: String,
    players: Vec<RosterEntry>,
    current_round: Option<u32>,
    current_voting_round: Option<u32>,
    clues: Vec<Clue>,
    votes: Vec<Vote>,
    eliminations: Vec<Elimination>,
    validation_errors: usize,
    result: Option<GameResult>,
    error: Option<String>,
}

impl GameReplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events<'a>(
        events: impl IntoIterator<Item = &'a GameEvent>,
    ) -> Result<Self, ReplayError> {
        let mut replay = Self::new();
        for event in events {
            replay.apply(event)?;
        }
        Ok(replay)
    }

    /// Fold one event into the state
    pub fn apply(&mut self, event: &GameEvent) -> Result<(), ReplayError> {
        if self.finished {
            return Err(ReplayError::AfterTerminal(event.event_type()));
        }

        match event {
            GameEvent::GameStart {
                category, players, ..
            } => {
                if self.started {
                    return Err(ReplayError::DuplicateStart);
                }
                self.started = true;
                self.category = category.clone();
                self.players = players.clone();
                return Ok(());
            }
            // A setup error may be the only event of a stream
            GameEvent::Error { message } => {
                self.error = Some(message.clone());
                self.finished = true;
                return Ok(());
            }
            _ if !self.started => return Err(ReplayError::NotStarted(event.event_type())),
            _ => {}
        }

        match event {
            GameEvent::RoundStart { round, .. } => self.current_round = Some(*round),
            GameEvent::Clue {
                round,
                player_id,
                clue_text,
                rationale,
                confidence,
                word_hypothesis,
                degraded,
                ..
            } => self.clues.push(Clue {
                round: *round,
                player_id: player_id.clone(),
                text: clue_text.clone(),
                rationale: rationale.clone(),
                confidence: *confidence,
                word_hypothesis: word_hypothesis.clone(),
                degraded: *degraded,
            }),
            GameEvent::VotingRoundStart { voting_round, .. } => {
                self.current_voting_round = Some(*voting_round)
            }
            GameEvent::Vote {
                voting_round,
                player_id,
                target,
                rationale,
                confidence,
                degraded,
                ..
            } => self.votes.push(Vote {
                voting_round: *voting_round,
                voter_id: player_id.clone(),
                target: target.clone(),
                rationale: rationale.clone(),
                confidence: *confidence,
                degraded: *degraded,
            }),
            GameEvent::Elimination {
                voting_round,
                eliminated_player,
                was_imposter,
                vote_counts,
                remaining_imposters,
                tied,
            } => self.eliminations.push(Elimination {
                voting_round: *voting_round,
                eliminated: eliminated_player.clone(),
                vote_counts: vote_counts.clone(),
                was_imposter: *was_imposter,
                remaining_imposters: *remaining_imposters,
                tied: tied.clone(),
            }),
            GameEvent::ValidationError { .. } => self.validation_errors += 1,
            GameEvent::GameComplete {
                word,
                category,
                actual_imposters,
                eliminated_players,
                detection_accuracy,
                total_clue_rounds,
                winner,
            } => {
                self.result = Some(GameResult {
                    word: word.clone(),
                    category: category.clone(),
                    actual_imposters: actual_imposters.clone(),
                    eliminated_players: eliminated_players.clone(),
                    detection_accuracy: *detection_accuracy,
                    total_clue_rounds: *total_clue_rounds,
                    winner: *winner,
                    clues: self.clues.clone(),
                    votes: self.votes.clone(),
                    eliminations: self.eliminations.clone(),
                });
                self.finished = true;
            }
            GameEvent::PlayerThinking { .. }
            | GameEvent::RoundEnd { .. }
            | GameEvent::PlayerVoting { .. }
            | GameEvent::VotingRoundEnd { .. }
            | GameEvent::GameStart { .. }
            | GameEvent::Error { .. } => {}
        }
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn players(&self) -> &[RosterEntry] {
        &self.players
    }

    pub fn current_round(&self) -> Option<u32> {
        self.current_round
    }

    pub fn current_voting_round(&self) -> Option<u32> {
        self.current_voting_round
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    pub fn eliminations(&self) -> &[Elimination] {
        &self.eliminations
    }

    pub fn validation_errors(&self) -> usize {
        self.validation_errors
    }

    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Players not yet eliminated, in seat order
    pub fn active_players(&self) -> Vec<PlayerId> {
        let eliminated: Vec<&PlayerId> = self
            .eliminations
            .iter()
            .filter_map(|e| e.eliminated.as_ref())
            .collect();
        self.players
            .iter()
            .map(|p| &p.id)
            .filter(|id| !eliminated.contains(id))
            .cloned()
            .collect()
    }

    /// Tally of the current voting round as seen so far
    pub fn running_tally(&self) -> VoteTally {
        match self.current_voting_round {
            Some(round) => {
                VoteTally::from_votes(self.votes.iter().filter(|v| v.voting_round == round))
            }
            None => VoteTally::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ModelKey;
    use crate::game::Winner;

    fn start() -> GameEvent {
        GameEvent::GameStart {
            category: "places".to_string(),
            num_imposters: 1,
            num_clue_rounds: 1,
            num_voting_rounds: 1,
            players: (0..3)
                .map(|i| RosterEntry {
                    id: PlayerId::from_seat(i),
                    model: ModelKey::new("llama"),
                })
                .collect(),
        }
    }

    #[test]
    fn test_events_before_start_rejected() {
        let mut replay = GameReplay::new();
        assert_eq!(
            replay.apply(&GameEvent::RoundStart {
                round: 1,
                total_rounds: 1
            }),
            Err(ReplayError::NotStarted("round_start"))
        );
    }

    #[test]
    fn test_setup_error_only_stream() {
        let replay = GameReplay::from_events(&[GameEvent::error("bad config")]).unwrap();
        assert!(replay.is_finished());
        assert_eq!(replay.error(), Some("bad config"));
    }

    #[test]
    fn test_fold_votes_and_elimination() {
        let mut tally = VoteTally::new();
        tally.record(&PlayerId::from("Player_3"));
        let events = vec![
            start(),
            GameEvent::VotingRoundStart {
                voting_round: 1,
                total_voting_rounds: 1,
                eliminated_so_far: vec![],
            },
            GameEvent::Vote {
                voting_round: 1,
                player_id: PlayerId::from("Player_1"),
                target: Some(PlayerId::from("Player_3")),
                rationale: "Player_3 seemed lost all game".to_string(),
                confidence: 80,
                running_tally: tally.clone(),
                degraded: false,
            },
        ];
        let mut replay = GameReplay::from_events(&events).unwrap();
        assert_eq!(replay.running_tally(), tally);

        replay
            .apply(&GameEvent::Elimination {
                voting_round: 1,
                eliminated_player: Some(PlayerId::from("Player_3")),
                was_imposter: true,
                vote_counts: tally,
                remaining_imposters: 0,
                tied: vec![],
            })
            .unwrap();
        assert_eq!(replay.active_players().len(), 2);

        replay
            .apply(&GameEvent::GameComplete {
                word: "lighthouse".to_string(),
                category: "places".to_string(),
                actual_imposters: vec![PlayerId::from("Player_3")],
                eliminated_players: vec![PlayerId::from("Player_3")],
                detection_accuracy: 1.0,
                total_clue_rounds: 1,
                winner: Winner::Civilians,
            })
            .unwrap();
        let result = replay.result().unwrap();
        assert_eq!(result.votes.len(), 1);
        assert_eq!(result.eliminations.len(), 1);

        assert_eq!(
            replay.apply(&GameEvent::RoundEnd { round: 1 }),
            Err(ReplayError::AfterTerminal("round_end"))
        );
    }
}
