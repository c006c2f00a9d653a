//! Battle event log.
//!
//! Every state transition a simulation performs is recorded as an [`Event`].
//! The log is append-only while the match runs and read-only afterwards; it is
//! the single source [`crate::engine::replay`] reconstructs state from.

use crate::balance::{BuffId, DebuffId, StatusId};
use crate::config::RoundLimitPolicy;
use crate::engine::{EndReason, MatchId, Outcome};
use crate::model::{CharacterId, PassiveTrigger};
use crate::state::{Application, EffectRef, Slot};

/// Participant entry of the match header.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterEntry {
    pub slot: Slot,
    pub character: CharacterId,
    pub name: String,
    pub max_hp: u32,
    /// Number of declared skills (cooldown slots).
    pub skills: u8,
}

/// Skill used on a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SkillRef {
    /// Fallback attack, has no cooldown slot.
    Basic,
    /// Index into the actor's declared skills.
    Declared(u8),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum EventKind {
    /// Header. Always the first event.
    MatchStarted {
        match_id: MatchId,
        seed: u64,
        /// How a round-limit ending is decided, so replay can check it.
        round_limit_policy: RoundLimitPolicy,
        roster: Vec<RosterEntry>,
    },
    RoundStarted,
    TurnOrder {
        order: Vec<Slot>,
    },
    TurnStarted {
        actor: Slot,
    },
    TurnSkipped {
        actor: Slot,
        status: StatusId,
    },
    SkillUsed {
        actor: Slot,
        skill: SkillRef,
        targets: Vec<Slot>,
        /// Cooldown set on the used skill, 0 for the basic attack.
        cooldown: u8,
    },
    Missed {
        actor: Slot,
        target: Slot,
    },
    Hit {
        actor: Slot,
        target: Slot,
        damage: u32,
        critical: bool,
        /// Elemental multiplier in percent.
        elemental: u32,
        hp_after: u32,
    },
    /// Flat damage from a damage effect.
    EffectDamage {
        source: Slot,
        target: Slot,
        damage: u32,
        hp_after: u32,
    },
    Healed {
        source: Slot,
        target: Slot,
        amount: u32,
        hp_after: u32,
    },
    BuffApplied {
        source: Slot,
        target: Slot,
        buff: BuffId,
        application: Application,
    },
    DebuffApplied {
        source: Slot,
        target: Slot,
        debuff: DebuffId,
        application: Application,
    },
    StatusApplied {
        source: Slot,
        target: Slot,
        status: StatusId,
        application: Application,
    },
    PassiveTriggered {
        owner: Slot,
        passive: u8,
        trigger: PassiveTrigger,
    },
    StatusTick {
        target: Slot,
        status: StatusId,
        damage: u32,
        hp_after: u32,
    },
    /// `by` is `None` for status-tick defeats.
    Defeated {
        target: Slot,
        by: Option<Slot>,
    },
    /// Round-end decay of all effect durations and cooldowns.
    EffectsTicked,
    EffectExpired {
        target: Slot,
        effect: EffectRef,
    },
    RoundEnded,
    /// Terminal. Always the last event.
    MatchEnded {
        outcome: Outcome,
        reason: EndReason,
    },
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MatchStarted { .. } => "match_started",
            Self::RoundStarted => "round_started",
            Self::TurnOrder { .. } => "turn_order",
            Self::TurnStarted { .. } => "turn_started",
            Self::TurnSkipped { .. } => "turn_skipped",
            Self::SkillUsed { .. } => "skill_used",
            Self::Missed { .. } => "missed",
            Self::Hit { .. } => "hit",
            Self::EffectDamage { .. } => "effect_damage",
            Self::Healed { .. } => "healed",
            Self::BuffApplied { .. } => "buff_applied",
            Self::DebuffApplied { .. } => "debuff_applied",
            Self::StatusApplied { .. } => "status_applied",
            Self::PassiveTriggered { .. } => "passive_triggered",
            Self::StatusTick { .. } => "status_tick",
            Self::Defeated { .. } => "defeated",
            Self::EffectsTicked => "effects_ticked",
            Self::EffectExpired { .. } => "effect_expired",
            Self::RoundEnded => "round_ended",
            Self::MatchEnded { .. } => "match_ended",
        }
    }
}

/// One log entry. `sequence` is the entry's index in the log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    /// 0 for the header and battle-start passives.
    pub round: u32,
    pub sequence: u32,
    pub kind: EventKind,
}

/// Ordered, append-only event log.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, round: u32, kind: EventKind) {
        let sequence = self.events.len() as u32;
        self.events.push(Event {
            round,
            sequence,
            kind,
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }
}

impl AsRef<[Event]> for EventLog {
    fn as_ref(&self) -> &[Event] {
        &self.events
    }
}

impl From<Vec<Event>> for EventLog {
    fn from(events: Vec<Event>) -> Self {
        Self { events }
    }
}
