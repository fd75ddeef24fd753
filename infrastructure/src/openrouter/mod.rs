//! OpenRouter adapter
//!
//! Implements the `AgentBackend` port against OpenRouter's OpenAI-compatible
//! chat completions API (any compatible endpoint works via `base_url`).

pub mod backend;
pub mod error;
pub mod protocol;

pub use backend::{DEFAULT_BASE_URL, OpenRouterBackend, OpenRouterConfig};
pub use error::OpenRouterError;
