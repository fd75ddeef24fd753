//! Configuration file loading for the imposter game
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `IMPOSTER_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./imposter.toml` or `./.imposter.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/imposter/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentConfig, FileBackendConfig, FileConfig, FileGameConfig,
    FileModelEntry, FileModelsConfig, FileOutputConfig, FileOutputFormat,
};
pub use loader::ConfigLoader;
