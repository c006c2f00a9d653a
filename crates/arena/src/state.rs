//! Per-match lifecycle tracked by the arena.
//!
//! ```text
//! Queued ──> Running ──> Completed | Failed
//!    └─────> Cancelled
//! ```
//!
//! Terminal states are final.
use std::sync::Arc;

use battle_core::{BattleResult, EngineError};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a tracked match.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    Queued,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl MatchState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// State plus the payload of a terminal state.
///
/// Published through a watch channel per match, so readers of a finished
/// result never contend with the queue lock.
#[derive(Clone, Debug)]
pub enum MatchStatus {
    Queued,
    Running,
    Completed(Arc<BattleResult>),
    Failed(EngineError),
    Cancelled,
}

impl MatchStatus {
    pub fn state(&self) -> MatchState {
        match self {
            Self::Queued => MatchState::Queued,
            Self::Running => MatchState::Running,
            Self::Completed(_) => MatchState::Completed,
            Self::Failed(_) => MatchState::Failed,
            Self::Cancelled => MatchState::Cancelled,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state().is_terminal()
    }
}
