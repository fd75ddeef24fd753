//! Console output formatter for finished games

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use imposter_domain::{Clue, Elimination, GameResult, PlayerId, Vote, Winner};

/// Formats game results for console display
pub struct ConsoleFormatter;

impl OutputFormatter for ConsoleFormatter {
    fn format_full(&self, result: &GameResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Imposter Game Log"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Category:".cyan().bold(),
            result.category
        ));

        let rounds = result.clues.iter().map(|c| c.round).max().unwrap_or(0);
        for round in 1..=rounds {
            output.push_str(&Self::section_header(&format!("Clue Round {}", round)));
            for clue in result.clues.iter().filter(|c| c.round == round) {
                output.push_str(&Self::clue_line(clue, result));
            }
        }

        for elimination in &result.eliminations {
            output.push_str(&Self::section_header(&format!(
                "Voting Round {}",
                elimination.voting_round
            )));
            for vote in result
                .votes
                .iter()
                .filter(|v| v.voting_round == elimination.voting_round)
            {
                output.push_str(&Self::vote_line(vote));
            }
            output.push_str(&Self::elimination_line(elimination));
        }

        output.push('\n');
        output.push_str(&self.format_summary(result));
        output.push_str(&Self::footer());

        output
    }

    fn format_json(&self, result: &GameResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_summary(&self, result: &GameResult) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Imposter Game Result ===".cyan().bold()));

        let winner = match result.winner {
            Winner::Civilians => "Civilians win!".green().bold(),
            Winner::Imposters => "Imposters win!".red().bold(),
        };
        output.push_str(&format!("{}\n\n", winner));

        output.push_str(&format!(
            "{} {} ({})\n",
            "Secret word:".bold(),
            result.word,
            result.category
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Imposters:".bold(),
            Self::join(&result.actual_imposters)
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Eliminated:".bold(),
            if result.eliminated_players.is_empty() {
                "nobody".to_string()
            } else {
                Self::join(&result.eliminated_players)
            }
        ));
        output.push_str(&format!(
            "{} {:.0}%\n",
            "Detection accuracy:".bold(),
            result.detection_accuracy * 100.0
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Clue rounds:".dimmed(),
            result.total_clue_rounds
        ));

        output
    }
}

impl ConsoleFormatter {
    fn clue_line(clue: &Clue, result: &GameResult) -> String {
        let is_imposter = result.actual_imposters.contains(&clue.player_id);
        let name = if is_imposter {
            format!("{} (imposter)", clue.player_id).red().bold()
        } else {
            clue.player_id.to_string().yellow().bold()
        };
        let text = if clue.degraded {
            clue.text.dimmed()
        } else {
            clue.text.bold()
        };
        let mut line = format!("  {}: {} [{}%]\n", name, text, clue.confidence);
        line.push_str(&format!("      {}\n", clue.rationale.dimmed()));
        if let Some(guess) = &clue.word_hypothesis {
            line.push_str(&format!("      {} {}\n", "guesses:".dimmed(), guess));
        }
        line
    }

    fn vote_line(vote: &Vote) -> String {
        let target = match &vote.target {
            Some(target) => target.to_string().bold(),
            None => "abstained".dimmed(),
        };
        format!(
            "  {} -> {} [{}%]\n      {}\n",
            vote.voter_id.to_string().yellow(),
            target,
            vote.confidence,
            vote.rationale.dimmed()
        )
    }

    fn elimination_line(elimination: &Elimination) -> String {
        let counts = elimination
            .vote_counts
            .counts()
            .iter()
            .map(|(id, n)| format!("{}: {}", id, n))
            .collect::<Vec<_>>()
            .join(", ");
        let verdict = match &elimination.eliminated {
            Some(id) if elimination.was_imposter => {
                format!("{} eliminated, an imposter", id).green().bold()
            }
            Some(id) => format!("{} eliminated, a civilian", id).red().bold(),
            None if !elimination.tied.is_empty() => format!(
                "Tie between {}, nobody eliminated",
                Self::join(&elimination.tied)
            )
            .yellow()
            .bold(),
            None => "Nobody eliminated".yellow().bold(),
        };
        format!("  {} {}\n  {}\n", "Votes:".dimmed(), counts, verdict)
    }

    fn join(ids: &[PlayerId]) -> String {
        ids.iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
