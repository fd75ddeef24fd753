//! Progress reporting for a running game

use colored::Colorize;
use imposter_application::EventSink;
use imposter_domain::GameEvent;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};

/// Reports progress with one bar per clue or voting round
pub struct ProgressReporter {
    multi: MultiProgress,
    state: Mutex<BarState>,
}

#[derive(Default)]
struct BarState {
    active_players: usize,
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            state: Mutex::new(BarState::default()),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn start_bar(&self, state: &mut BarState, prefix: String) {
        let pb = self
            .multi
            .add(ProgressBar::new(state.active_players as u64));
        pb.set_style(Self::round_style());
        pb.set_prefix(prefix);
        pb.set_message("Starting...");
        state.bar = Some(pb);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for ProgressReporter {
    fn emit(&self, event: &GameEvent) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match event {
            GameEvent::GameStart { players, .. } => state.active_players = players.len(),
            GameEvent::RoundStart {
                round,
                total_rounds,
            } => self.start_bar(&mut state, format!("Clue round {}/{}", round, total_rounds)),
            GameEvent::VotingRoundStart {
                voting_round,
                total_voting_rounds,
                ..
            } => self.start_bar(
                &mut state,
                format!("Voting round {}/{}", voting_round, total_voting_rounds),
            ),
            GameEvent::PlayerThinking { player_id, .. } => {
                if let Some(pb) = state.bar.as_ref() {
                    pb.set_message(format!("{} is thinking", player_id));
                }
            }
            GameEvent::PlayerVoting { player_id, .. } => {
                if let Some(pb) = state.bar.as_ref() {
                    pb.set_message(format!("{} is voting", player_id));
                }
            }
            GameEvent::Clue {
                player_id,
                degraded,
                ..
            }
            | GameEvent::Vote {
                player_id,
                degraded,
                ..
            } => {
                if let Some(pb) = state.bar.as_ref() {
                    let status = if *degraded {
                        format!("{} {}", "x".red(), player_id)
                    } else {
                        format!("{} {}", "v".green(), player_id)
                    };
                    pb.set_message(status);
                    pb.inc(1);
                }
            }
            GameEvent::RoundEnd { round } => {
                if let Some(pb) = state.bar.take() {
                    pb.finish_with_message(
                        format!("Clue round {} complete!", round)
                            .green()
                            .to_string(),
                    );
                }
            }
            GameEvent::Elimination {
                eliminated_player, ..
            } => {
                if eliminated_player.is_some() {
                    state.active_players = state.active_players.saturating_sub(1);
                }
            }
            GameEvent::VotingRoundEnd { voting_round } => {
                if let Some(pb) = state.bar.take() {
                    pb.finish_with_message(
                        format!("Voting round {} complete!", voting_round)
                            .green()
                            .to_string(),
                    );
                }
            }
            GameEvent::Error { .. } => {
                if let Some(pb) = state.bar.take() {
                    pb.abandon_with_message("aborted".red().to_string());
                }
            }
            GameEvent::ValidationError { .. } | GameEvent::GameComplete { .. } => {}
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl EventSink for SimpleProgress {
    fn emit(&self, event: &GameEvent) {
        match event {
            GameEvent::RoundStart {
                round,
                total_rounds,
            } => println!(
                "{} {}",
                "->".cyan(),
                format!("Clue round {}/{}", round, total_rounds).bold()
            ),
            GameEvent::VotingRoundStart {
                voting_round,
                total_voting_rounds,
                ..
            } => println!(
                "{} {}",
                "->".cyan(),
                format!("Voting round {}/{}", voting_round, total_voting_rounds).bold()
            ),
            GameEvent::Clue {
                player_id,
                degraded,
                ..
            }
            | GameEvent::Vote {
                player_id,
                degraded,
                ..
            } => {
                if *degraded {
                    println!("  {} {} (fallback)", "x".red(), player_id);
                } else {
                    println!("  {} {}", "v".green(), player_id);
                }
            }
            GameEvent::RoundEnd { .. } | GameEvent::VotingRoundEnd { .. } => println!(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imposter_domain::{ModelKey, PlayerId, RosterEntry, VoteTally};

    #[test]
    fn test_bar_tracks_active_players() {
        let reporter = ProgressReporter::new();
        reporter.emit(&GameEvent::GameStart {
            category: "nature".to_string(),
            num_imposters: 1,
            num_clue_rounds: 1,
            num_voting_rounds: 1,
            players: (0..4)
                .map(|i| RosterEntry {
                    id: PlayerId::from_seat(i),
                    model: ModelKey::new("llama"),
                })
                .collect(),
        });
        reporter.emit(&GameEvent::RoundStart {
            round: 1,
            total_rounds: 1,
        });
        {
            let state = reporter.state.lock().unwrap();
            assert_eq!(state.bar.as_ref().and_then(|pb| pb.length()), Some(4));
        }

        reporter.emit(&GameEvent::RoundEnd { round: 1 });
        reporter.emit(&GameEvent::Elimination {
            voting_round: 1,
            eliminated_player: Some(PlayerId::from("Player_2")),
            was_imposter: false,
            vote_counts: VoteTally::new(),
            remaining_imposters: 1,
            tied: vec![],
        });
        let state = reporter.state.lock().unwrap();
        assert!(state.bar.is_none());
        assert_eq!(state.active_players, 3);
    }
}
