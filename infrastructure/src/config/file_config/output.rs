//! Output configuration from TOML (`[output]` section)

use imposter_domain::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Re-export OutputFormat from domain for convenience
pub use imposter_domain::OutputFormat as FileOutputFormat;

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Result format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
    /// Print every event as it happens
    pub live: bool,
    /// Write the event stream as JSONL to this path
    pub event_log: Option<PathBuf>,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            live: true,
            event_log: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_section_deserialize() {
        let toml_str = r#"
[output]
format = "json"
live = false
event_log = "runs/game.jsonl"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.live);
        assert!(config.output.color);
        assert_eq!(config.output.event_log, Some(PathBuf::from("runs/game.jsonl")));
    }
}
