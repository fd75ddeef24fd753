//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished game is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Result summary only (default)
    #[default]
    Summary,
    /// Every clue, vote and elimination, then the summary
    Full,
    /// The `GameResult` as JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(OutputFormat::Summary),
            "full" => Ok(OutputFormat::Full),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}. Valid: summary, full, json", s)),
        }
    }
}
