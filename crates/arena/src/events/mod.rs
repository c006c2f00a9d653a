//! Lifecycle event bus for arena matches.
//!
//! External collaborators (reward settlement, log persistence) subscribe here
//! instead of polling the queue.

mod bus;
mod types;

pub use bus::EventBus;
pub use types::ArenaEvent;
