//! Public arena API surface.
//!
//! This module gathers the types exposed to consumers of the arena crate so
//! the orchestrator and workers can stay focused on scheduling.

pub mod errors;
pub mod executor;
pub mod handle;

pub use errors::{ArenaError, Result};
pub use executor::{EngineExecutor, MatchExecutor};
pub use handle::MatchHandle;
