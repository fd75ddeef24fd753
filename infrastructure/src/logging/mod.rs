//! Logging infrastructure: the persisted game event stream.
//!
//! Provides [`JsonlEventLog`], a JSONL file writer that implements the
//! [`EventSink`](imposter_application::EventSink) port, and
//! [`read_event_log`] to load a log back for replay.

mod jsonl_event_log;

pub use jsonl_event_log::{EventLogError, JsonlEventLog, read_event_log};
