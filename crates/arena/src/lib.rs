//! Concurrent match execution for the battle engine.
//!
//! The arena accepts validated [`BattleMatch`](battle_core::BattleMatch)es
//! into a bounded priority queue and runs them on a fixed pool of workers.
//! Results are cached per match id until evicted with
//! [`Arena::clear_cache`], and every lifecycle transition is broadcast as an
//! [`ArenaEvent`].
//!
//! ```no_run
//! # async fn demo(battle: battle_core::BattleMatch) -> arena_runtime::Result<()> {
//! use std::time::Duration;
//! use arena_runtime::{Arena, ArenaConfig, StopMode};
//!
//! let arena = Arena::new(ArenaConfig::default())?;
//! arena.start()?;
//! let handle = arena.queue_match(battle, 0)?;
//! let result = arena.get_result(handle.match_id(), Duration::from_secs(5)).await?;
//! println!("{}", result.outcome);
//! arena.stop(StopMode::Drain).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod events;
pub mod runtime;
pub mod state;

mod queue;
mod workers;

pub use api::{ArenaError, EngineExecutor, MatchExecutor, MatchHandle, Result};
pub use config::ArenaConfig;
pub use events::{ArenaEvent, EventBus};
pub use runtime::{Arena, ArenaBuilder, StopMode};
pub use state::{MatchState, MatchStatus};
pub use workers::ArenaMetrics;
