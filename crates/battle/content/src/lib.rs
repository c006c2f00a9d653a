//! Data-driven content definitions and loaders.
//!
//! This crate reads battle content from RON/TOML data files:
//! - Character rosters (data-driven via RON)
//! - Battle configuration (data-driven via TOML)
//!
//! Every id and enum in a content file maps onto a closed battle-core type, so
//! unknown buffs, statuses or elements are rejected here, at load time, and
//! never reach a simulation.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, Roster, RosterLoader};
