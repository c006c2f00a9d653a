//! Deterministic turn-based battle simulation.
//!
//! `battle-core` defines the canonical combat rules (characters, skills,
//! effects, damage) and exposes pure APIs shared by the arena runtime and
//! offline tools. A match is a pure function of its parties, configuration
//! and seed: [`engine::simulate`] produces an event log that
//! [`engine::replay`] can reconstruct and verify without re-running combat.
pub mod balance;
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod model;
pub mod state;

pub use balance::{BuffId, DebuffId, StatusId};
pub use config::{BattleConfig, RoundLimitPolicy, SkillPolicy, TargetPolicy};
pub use engine::{
    BattleMatch, BattleResult, BattleSummary, EndReason, MatchId, Outcome, ParticipantTotals,
    ReplayOutput, RoundSummary, calculate_power, create_match, replay, simulate,
};
pub use error::{CombatError, EngineError, ErrorSeverity, ReplayError, ValidationError};
pub use event::{Event, EventKind, EventLog, RosterEntry, SkillRef};
pub use model::{
    Chance, Character, CharacterId, CharacterStats, Effect, EffectTarget, Element,
    PassiveAbility, PassiveTrigger, Rarity, Skill, SkillKind, Stat, TargetRule,
};
pub use state::{ParticipantSnapshot, Side, Slot, StateDigest};
