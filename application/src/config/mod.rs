//! Application-level configuration.
//!
//! - [`CallPolicy`]: retry, timeout and temperature control for agent calls

pub mod call_policy;

pub use call_policy::CallPolicy;
