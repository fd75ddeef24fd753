//! Configuration value objects for the domain layer
//!
//! Used by both the file configuration loader and the CLI.

mod issue;
mod output_format;

pub use issue::{ConfigIssue, ConfigIssueCode, Severity};
pub use output_format::OutputFormat;
