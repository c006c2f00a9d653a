//! Errors surfaced by battle-core.
//!
//! [`ValidationError`] rejects a match, party, character or config before any
//! battle state exists, so a failed `create_match` leaves nothing behind.
//! [`EngineError`] reports a broken invariant in a simulation that started from
//! valid input. [`ReplayError`] rejects an event log that does not apply to the
//! state its own earlier events built.
//!
//! All three implement [`CombatError`], which the arena uses to pick log
//! levels and to decide whether a caller may resubmit.

use crate::model::CharacterId;
use crate::state::Side;

/// How a caller should react to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Transient arena condition (full queue, result pending). Resubmitting
    /// the same match later can succeed.
    Recoverable,
    /// The match or its content is malformed; it fails the same way every time.
    Validation,
    /// The engine reached a state valid input cannot produce.
    Internal,
    /// A recorded log contradicts itself and cannot be trusted.
    Fatal,
}

impl ErrorSeverity {
    /// Lowercase label used in log fields.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Engine bugs and corrupt logs.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Classification shared by every error type in this crate and the arena.
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier of the variant, e.g. `"REPLAY_SEED_MISMATCH"`.
    fn error_code(&self) -> &'static str;
}

/// Input rejected by `create_match` or by a loader before any state exists.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationError {
    #[error("party {side} is empty")]
    EmptyParty { side: Side },

    #[error("party {side} has {size} members, maximum is {max}")]
    PartyTooLarge { side: Side, size: usize, max: usize },

    #[error("match id must not be empty")]
    EmptyMatchId,

    #[error("invalid battle config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("invalid character {character}: {reason}")]
    InvalidCharacter {
        character: CharacterId,
        reason: &'static str,
    },
}

impl CombatError for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyParty { .. } => "VALIDATION_EMPTY_PARTY",
            Self::PartyTooLarge { .. } => "VALIDATION_PARTY_TOO_LARGE",
            Self::EmptyMatchId => "VALIDATION_EMPTY_MATCH_ID",
            Self::InvalidConfig { .. } => "VALIDATION_INVALID_CONFIG",
            Self::InvalidCharacter { .. } => "VALIDATION_INVALID_CHARACTER",
        }
    }
}

/// Failure raised while a simulation is running.
///
/// Valid input never produces this; it exists so an inconsistent internal
/// lookup is surfaced instead of panicking inside a worker.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    #[error("internal engine error in match '{match_id}' at round {round}: {reason}")]
    Internal {
        match_id: String,
        round: u32,
        reason: String,
    },
}

impl EngineError {
    pub fn internal(match_id: impl Into<String>, round: u32, reason: impl Into<String>) -> Self {
        Self::Internal {
            match_id: match_id.into(),
            round,
            reason: reason.into(),
        }
    }
}

impl CombatError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        "ENGINE_INTERNAL"
    }
}

/// Errors surfaced by [`crate::engine::replay`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReplayError {
    #[error("event log is empty")]
    EmptyLog,

    #[error("event log does not start with a match header")]
    MissingHeader,

    #[error("replay seed {provided} does not match recorded seed {recorded}")]
    SeedMismatch { provided: u64, recorded: u64 },

    #[error("replay mismatch at event {index}: {reason}")]
    Mismatch { index: usize, reason: String },
}

impl ReplayError {
    pub(crate) fn mismatch(index: usize, reason: impl Into<String>) -> Self {
        Self::Mismatch {
            index,
            reason: reason.into(),
        }
    }
}

impl CombatError for ReplayError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SeedMismatch { .. } => ErrorSeverity::Validation,
            Self::EmptyLog | Self::MissingHeader | Self::Mismatch { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyLog => "REPLAY_EMPTY_LOG",
            Self::MissingHeader => "REPLAY_MISSING_HEADER",
            Self::SeedMismatch { .. } => "REPLAY_SEED_MISMATCH",
            Self::Mismatch { .. } => "REPLAY_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        let err = ValidationError::EmptyParty { side: Side::A };
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert!(!err.severity().is_recoverable());

        let err = EngineError::internal("m-1", 3, "missing participant");
        assert!(err.severity().is_internal());
        assert_eq!(err.error_code(), "ENGINE_INTERNAL");

        let err = ReplayError::mismatch(7, "hp diverged");
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert_eq!(err.to_string(), "replay mismatch at event 7: hp diverged");
    }

    #[test]
    fn severity_labels() {
        let labels: Vec<_> = [
            ErrorSeverity::Recoverable,
            ErrorSeverity::Validation,
            ErrorSeverity::Internal,
            ErrorSeverity::Fatal,
        ]
        .iter()
        .map(|severity| (severity.as_str(), severity.is_internal()))
        .collect();
        assert_eq!(
            labels,
            vec![
                ("recoverable", false),
                ("validation", false),
                ("internal", true),
                ("fatal", true),
            ]
        );
        assert_eq!(
            ReplayError::SeedMismatch { provided: 1, recorded: 2 }.severity().as_str(),
            "validation"
        );
    }
}
