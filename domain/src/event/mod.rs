//! Game event stream: typed events and the replay fold

pub mod game_event;
pub mod replay;

pub use game_event::{GameEvent, RosterEntry};
pub use replay::{GameReplay, ReplayError};
