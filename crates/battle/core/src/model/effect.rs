//! Effects carried by skills and passive abilities.
//!
//! The set is closed: every effect the engine knows how to apply is a variant
//! here, so the resolver is an exhaustive match and content files cannot name
//! behaviour that does not exist.

use crate::balance::{BuffId, DebuffId, StatusId};

/// Who an effect lands on, relative to the action that carries it.
///
/// `Target` is the participant the action resolved against. For passives
/// triggered without a counterpart (battle start, turn start) it falls back to
/// the passive's owner.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum EffectTarget {
    #[default]
    Target,
    Caster,
}

/// Flat damage that bypasses armor and crits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageEffect {
    pub amount: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub on: EffectTarget,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffEffect {
    pub id: BuffId,
    pub on: EffectTarget,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebuffEffect {
    pub id: DebuffId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub on: EffectTarget,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub id: StatusId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub on: EffectTarget,
}

/// Restores HP, capped at max HP.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealEffect {
    pub amount: u32,
    pub on: EffectTarget,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    Damage(DamageEffect),
    Buff(BuffEffect),
    Debuff(DebuffEffect),
    Status(StatusEffect),
    Heal(HealEffect),
}

impl Effect {
    pub const fn damage(amount: u32) -> Self {
        Self::Damage(DamageEffect {
            amount,
            on: EffectTarget::Target,
        })
    }

    /// Buff on the caster.
    pub const fn buff(id: BuffId) -> Self {
        Self::Buff(BuffEffect {
            id,
            on: EffectTarget::Caster,
        })
    }

    pub const fn debuff(id: DebuffId) -> Self {
        Self::Debuff(DebuffEffect {
            id,
            on: EffectTarget::Target,
        })
    }

    pub const fn status(id: StatusId) -> Self {
        Self::Status(StatusEffect {
            id,
            on: EffectTarget::Target,
        })
    }

    /// Heal on the caster.
    pub const fn heal(amount: u32) -> Self {
        Self::Heal(HealEffect {
            amount,
            on: EffectTarget::Caster,
        })
    }

    /// Same effect redirected to `on`.
    pub const fn on(self, on: EffectTarget) -> Self {
        match self {
            Self::Damage(e) => Self::Damage(DamageEffect { on, ..e }),
            Self::Buff(e) => Self::Buff(BuffEffect { on, ..e }),
            Self::Debuff(e) => Self::Debuff(DebuffEffect { on, ..e }),
            Self::Status(e) => Self::Status(StatusEffect { on, ..e }),
            Self::Heal(e) => Self::Heal(HealEffect { on, ..e }),
        }
    }

    pub const fn target(&self) -> EffectTarget {
        match self {
            Self::Damage(e) => e.on,
            Self::Buff(e) => e.on,
            Self::Debuff(e) => e.on,
            Self::Status(e) => e.on,
            Self::Heal(e) => e.on,
        }
    }
}
