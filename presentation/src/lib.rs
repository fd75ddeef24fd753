//! Presentation layer for imposter-arena
//!
//! This crate contains CLI definitions, the live event printer,
//! progress reporters, and result formatters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use output::live::ConsoleEventPrinter;
pub use output::set_color;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
