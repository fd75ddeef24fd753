//! Live console output of the event stream

use colored::Colorize;
use imposter_application::EventSink;
use imposter_domain::{GameEvent, VoteTally};

/// Prints each game event as it happens
pub struct ConsoleEventPrinter {
    show_reasoning: bool,
}

impl ConsoleEventPrinter {
    pub fn new() -> Self {
        Self {
            show_reasoning: true,
        }
    }

    /// Hide rationales and word guesses
    pub fn without_reasoning(mut self) -> Self {
        self.show_reasoning = false;
        self
    }

    /// Text for one event, or `None` for events that print nothing
    pub fn render(&self, event: &GameEvent) -> Option<String> {
        let text = match event {
            GameEvent::GameStart {
                category,
                num_imposters,
                num_clue_rounds,
                num_voting_rounds,
                players,
            } => {
                let mut out = format!(
                    "{} {} players, {} imposter(s), category {}\n",
                    "Game started:".cyan().bold(),
                    players.len(),
                    num_imposters,
                    category.bold()
                );
                out.push_str(&format!(
                    "  {} clue round(s), up to {} voting round(s)\n",
                    num_clue_rounds, num_voting_rounds
                ));
                for entry in players {
                    out.push_str(&format!("  {} {}\n", entry.id, entry.model.as_str().dimmed()));
                }
                out
            }
            GameEvent::RoundStart {
                round,
                total_rounds,
            } => format!(
                "\n{}",
                format!("-> Clue round {}/{}", round, total_rounds).cyan().bold()
            ),
            GameEvent::Clue {
                player_id,
                role,
                clue_text,
                rationale,
                confidence,
                word_hypothesis,
                degraded,
                ..
            } => {
                let name = match role {
                    Some(_) => format!("{} (imposter)", player_id).red().bold(),
                    None => player_id.to_string().yellow().bold(),
                };
                let clue = if *degraded {
                    format!("{} (fallback)", clue_text).dimmed()
                } else {
                    clue_text.bold()
                };
                let mut out = format!("  {}: {} [{}%]", name, clue, confidence);
                if self.show_reasoning {
                    out.push_str(&format!("\n      {}", rationale.dimmed()));
                    if let Some(guess) = word_hypothesis {
                        out.push_str(&format!("\n      {} {}", "guesses:".dimmed(), guess));
                    }
                }
                out
            }
            GameEvent::VotingRoundStart {
                voting_round,
                total_voting_rounds,
                eliminated_so_far,
            } => {
                let mut out = format!(
                    "\n{}",
                    format!("-> Voting round {}/{}", voting_round, total_voting_rounds)
                        .cyan()
                        .bold()
                );
                if !eliminated_so_far.is_empty() {
                    let names = eliminated_so_far
                        .iter()
                        .map(|id| id.to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    out.push_str(&format!(" {}", format!("(out: {})", names).dimmed()));
                }
                out
            }
            GameEvent::Vote {
                player_id,
                target,
                rationale,
                confidence,
                running_tally,
                ..
            } => {
                let target = match target {
                    Some(target) => target.to_string().bold(),
                    None => "abstains".dimmed(),
                };
                let mut out = format!(
                    "  {} -> {} [{}%] {}",
                    player_id.to_string().yellow(),
                    target,
                    confidence,
                    Self::tally(running_tally).dimmed()
                );
                if self.show_reasoning {
                    out.push_str(&format!("\n      {}", rationale.dimmed()));
                }
                out
            }
            GameEvent::Elimination {
                eliminated_player,
                was_imposter,
                remaining_imposters,
                tied,
                ..
            } => match eliminated_player {
                Some(id) if *was_imposter => format!(
                    "  {} {} imposter(s) left",
                    format!("x {} was an imposter!", id).green().bold(),
                    remaining_imposters
                ),
                Some(id) => format!(
                    "  {} {} imposter(s) left",
                    format!("x {} was a civilian.", id).red().bold(),
                    remaining_imposters
                ),
                None if !tied.is_empty() => format!(
                    "  {}",
                    format!(
                        "Tie between {}, nobody eliminated",
                        tied.iter()
                            .map(|id| id.to_string())
                            .collect::<Vec<_>>()
                            .join(", ")
                    )
                    .yellow()
                ),
                None => format!("  {}", "Nobody eliminated".yellow()),
            },
            GameEvent::GameComplete {
                winner,
                detection_accuracy,
                ..
            } => format!(
                "\n{} {} win ({:.0}% of imposters caught)",
                "Game complete:".cyan().bold(),
                winner.as_str().bold(),
                detection_accuracy * 100.0
            ),
            GameEvent::ValidationError {
                player_id, reason, ..
            } => format!(
                "  {} {} gave invalid output ({})",
                "!".yellow(),
                player_id,
                reason
            ),
            GameEvent::Error { message } => {
                format!("{} {}", "Error:".red().bold(), message)
            }
            GameEvent::PlayerThinking { .. }
            | GameEvent::PlayerVoting { .. }
            | GameEvent::RoundEnd { .. }
            | GameEvent::VotingRoundEnd { .. } => return None,
        };
        Some(text)
    }

    fn tally(tally: &VoteTally) -> String {
        let counts = tally
            .counts()
            .iter()
            .map(|(id, n)| format!("{}={}", id, n))
            .collect::<Vec<_>>()
            .join(" ");
        format!("{{{}}}", counts)
    }
}

impl Default for ConsoleEventPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for ConsoleEventPrinter {
    fn emit(&self, event: &GameEvent) {
        if let Some(text) = self.render(event) {
            println!("{}", text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imposter_domain::{PlayerId, Role};

    #[test]
    fn test_imposter_clue_is_marked() {
        colored::control::set_override(false);
        let printer = ConsoleEventPrinter::new();
        let event = GameEvent::Clue {
            round: 1,
            player_id: PlayerId::from("Player_4"),
            role: Some(Role::Imposter),
            clue_text: "waves".to_string(),
            rationale: "Sounds like the sea".to_string(),
            confidence: 40,
            word_hypothesis: Some("ocean".to_string()),
            degraded: false,
        };
        let text = printer.render(&event).unwrap();
        assert!(text.contains("Player_4 (imposter): waves [40%]"));
        assert!(text.contains("guesses: ocean"));

        let terse = ConsoleEventPrinter::new().without_reasoning();
        assert!(!terse.render(&event).unwrap().contains("ocean"));
    }

    #[test]
    fn test_vote_shows_running_tally() {
        colored::control::set_override(false);
        let mut tally = VoteTally::new();
        tally.record(&PlayerId::from("Player_2"));
        let event = GameEvent::Vote {
            voting_round: 1,
            player_id: PlayerId::from("Player_1"),
            target: Some(PlayerId::from("Player_2")),
            rationale: "Odd clue".to_string(),
            confidence: 55,
            running_tally: tally,
            degraded: false,
        };
        let text = ConsoleEventPrinter::new().render(&event).unwrap();
        assert!(text.contains("Player_1 -> Player_2 [55%] {Player_2=1}"));
    }

    #[test]
    fn test_progress_events_are_silent() {
        let printer = ConsoleEventPrinter::new();
        assert!(printer.render(&GameEvent::RoundEnd { round: 1 }).is_none());
        assert!(
            printer
                .render(&GameEvent::PlayerThinking {
                    round: 1,
                    player_id: PlayerId::from("Player_1"),
                })
                .is_none()
        );
        assert!(printer.render(&GameEvent::error("boom")).is_some());
    }
}
