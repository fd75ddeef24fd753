//! Port definitions (interfaces for external dependencies)

pub mod agent_backend;
pub mod event_sink;
pub mod prompt_builder;
