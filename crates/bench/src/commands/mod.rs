//! Command implementations for arena-bench
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod batch;
mod replay;
mod roster;
mod single;

pub use batch::Batch;
pub use replay::Replay;
pub use roster::ListRoster;
pub use single::Single;
