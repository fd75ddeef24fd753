//! Infrastructure layer for the Imposter game engine
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod openrouter;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileBackendConfig, FileConfig,
    FileGameConfig, FileModelsConfig, FileOutputConfig, FileOutputFormat,
};
pub use logging::{EventLogError, JsonlEventLog, read_event_log};
pub use openrouter::{OpenRouterBackend, OpenRouterConfig, OpenRouterError};
