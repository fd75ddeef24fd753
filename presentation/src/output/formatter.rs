//! Output formatter trait

use imposter_domain::{GameResult, OutputFormat};

/// Trait for formatting finished games
pub trait OutputFormatter {
    /// Every clue, vote and elimination followed by the summary
    fn format_full(&self, result: &GameResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &GameResult) -> String;

    /// Winner, imposters and accuracy only
    fn format_summary(&self, result: &GameResult) -> String;

    /// Dispatch on the requested format
    fn format(&self, result: &GameResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Summary => self.format_summary(result),
            OutputFormat::Full => self.format_full(result),
            OutputFormat::Json => self.format_json(result),
        }
    }
}
