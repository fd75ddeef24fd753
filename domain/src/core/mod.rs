//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelRegistry`]: injected mapping from short model keys to backend ids
//! - [`error::DomainError`]: domain-level errors
//! - [`text`]: small text helpers used when building events and prompts

pub mod error;
pub mod model;
pub mod text;
