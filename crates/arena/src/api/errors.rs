//! Unified error types surfaced by the arena API.
//!
//! Queue-level failures (`QueueFull`, `Timeout`) are recoverable by retrying
//! or polling again; `MatchFailed` carries the engine error of a match that
//! reached the `Failed` state.
use std::time::Duration;

use battle_core::{CombatError, EngineError, ErrorSeverity, MatchId};
use thiserror::Error;

use crate::state::MatchState;

pub type Result<T> = std::result::Result<T, ArenaError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArenaError {
    #[error("queue is full ({capacity} matches waiting)")]
    QueueFull { capacity: usize },

    #[error("match {match_id} did not finish within {timeout:?}")]
    Timeout { match_id: MatchId, timeout: Duration },

    #[error("match {match_id} cannot be cancelled while {state}")]
    CancellationDenied { match_id: MatchId, state: MatchState },

    #[error("match {0} is not tracked")]
    UnknownMatch(MatchId),

    #[error("match {0} is already tracked")]
    DuplicateMatch(MatchId),

    #[error("arena is stopped")]
    Stopped,

    #[error("match {match_id} failed")]
    MatchFailed {
        match_id: MatchId,
        #[source]
        source: EngineError,
    },

    #[error("match {0} was cancelled")]
    Cancelled(MatchId),

    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },
}

impl CombatError for ArenaError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::QueueFull { .. } | Self::Timeout { .. } => ErrorSeverity::Recoverable,
            Self::CancellationDenied { .. }
            | Self::UnknownMatch(_)
            | Self::DuplicateMatch(_)
            | Self::Cancelled(_)
            | Self::InvalidConfig { .. } => ErrorSeverity::Validation,
            Self::MatchFailed { source, .. } => source.severity(),
            Self::Stopped => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::QueueFull { .. } => "ARENA_QUEUE_FULL",
            Self::Timeout { .. } => "ARENA_TIMEOUT",
            Self::CancellationDenied { .. } => "ARENA_CANCELLATION_DENIED",
            Self::UnknownMatch(_) => "ARENA_UNKNOWN_MATCH",
            Self::DuplicateMatch(_) => "ARENA_DUPLICATE_MATCH",
            Self::Stopped => "ARENA_STOPPED",
            Self::MatchFailed { .. } => "ARENA_MATCH_FAILED",
            Self::Cancelled(_) => "ARENA_CANCELLED",
            Self::InvalidConfig { .. } => "ARENA_INVALID_CONFIG",
        }
    }
}
