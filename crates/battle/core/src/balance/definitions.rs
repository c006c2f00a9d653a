//! Buff, debuff and status catalogues.
//!
//! Identifiers are closed enums and each lookup is an exhaustive match into a
//! static table, so an unknown effect is a parse error at load time rather
//! than a runtime miss.

use crate::model::{Chance, Stat};

/// What happens when an effect is applied to a participant that already has it.
#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum OverwriteRule {
    /// Add a stack (up to the cap) and reset duration.
    Stack,
    /// Reset duration only.
    Refresh,
    /// Leave the existing effect untouched.
    Ignore,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StackingRule {
    pub stackable: bool,
    pub max_stacks: u8,
    pub overwrite: OverwriteRule,
}

impl StackingRule {
    pub const fn stacking(max_stacks: u8) -> Self {
        Self {
            stackable: true,
            max_stacks,
            overwrite: OverwriteRule::Stack,
        }
    }

    pub const fn refresh() -> Self {
        Self {
            stackable: false,
            max_stacks: 1,
            overwrite: OverwriteRule::Refresh,
        }
    }

    pub const fn ignore() -> Self {
        Self {
            stackable: false,
            max_stacks: 1,
            overwrite: OverwriteRule::Ignore,
        }
    }
}

/// Per-stack effect of a buff or debuff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Multiply the stat by `percent / 100` once per stack.
    Scale { stat: Stat, percent: u32 },
    /// Add to critical chance once per stack.
    CritChance(Chance),
}

macro_rules! effect_id {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            Debug,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            strum::Display,
            strum::EnumString,
            strum::AsRefStr,
            strum::EnumIter,
        )]
        #[strum(serialize_all = "snake_case", ascii_case_insensitive)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(rename_all = "snake_case")
        )]
        pub enum $name {
            $($variant),+
        }
    };
}

effect_id!(
    /// Beneficial stat effect.
    BuffId {
        AttackUp,
        DefenseUp,
        SpeedUp,
        ElementalShield,
        Focus,
        Keen,
    }
);

effect_id!(
    /// Harmful stat effect.
    DebuffId {
        AttackDown,
        DefenseDown,
        SpeedDown,
        Vulnerability,
    }
);

effect_id!(
    /// Damage-over-time or crowd-control condition.
    StatusId {
        Poison,
        Bleed,
        Burn,
        Freeze,
        Stun,
    }
);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuffDefinition {
    pub id: BuffId,
    pub name: &'static str,
    pub modifier: Modifier,
    pub duration: u8,
    pub stacking: StackingRule,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebuffDefinition {
    pub id: DebuffId,
    pub name: &'static str,
    pub modifier: Modifier,
    pub duration: u8,
    pub stacking: StackingRule,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusDefinition {
    pub id: StatusId,
    pub name: &'static str,
    /// Damage per stack dealt at round end.
    pub damage_per_round: u32,
    pub duration: u8,
    pub stacking: StackingRule,
    /// Holder loses its turn while this is active.
    pub prevents_action: bool,
}

// ============================================================================
// Buffs
// ============================================================================

static ATTACK_UP: BuffDefinition = BuffDefinition {
    id: BuffId::AttackUp,
    name: "Attack Up",
    modifier: Modifier::Scale {
        stat: Stat::Atk,
        percent: 130,
    },
    duration: 3,
    stacking: StackingRule::stacking(3),
};

static DEFENSE_UP: BuffDefinition = BuffDefinition {
    id: BuffId::DefenseUp,
    name: "Defense Up",
    modifier: Modifier::Scale {
        stat: Stat::Def,
        percent: 130,
    },
    duration: 3,
    stacking: StackingRule::stacking(3),
};

static SPEED_UP: BuffDefinition = BuffDefinition {
    id: BuffId::SpeedUp,
    name: "Speed Up",
    modifier: Modifier::Scale {
        stat: Stat::Spd,
        percent: 120,
    },
    duration: 2,
    stacking: StackingRule::stacking(2),
};

static ELEMENTAL_SHIELD: BuffDefinition = BuffDefinition {
    id: BuffId::ElementalShield,
    name: "Elemental Shield",
    modifier: Modifier::Scale {
        stat: Stat::ElemDef,
        percent: 140,
    },
    duration: 3,
    stacking: StackingRule::refresh(),
};

static FOCUS: BuffDefinition = BuffDefinition {
    id: BuffId::Focus,
    name: "Focus",
    modifier: Modifier::Scale {
        stat: Stat::ElemAtk,
        percent: 120,
    },
    duration: 2,
    stacking: StackingRule::stacking(2),
};

static KEEN: BuffDefinition = BuffDefinition {
    id: BuffId::Keen,
    name: "Keen",
    modifier: Modifier::CritChance(Chance::from_bps(1_500)),
    duration: 2,
    stacking: StackingRule::ignore(),
};

pub fn buff_definition(id: BuffId) -> &'static BuffDefinition {
    match id {
        BuffId::AttackUp => &ATTACK_UP,
        BuffId::DefenseUp => &DEFENSE_UP,
        BuffId::SpeedUp => &SPEED_UP,
        BuffId::ElementalShield => &ELEMENTAL_SHIELD,
        BuffId::Focus => &FOCUS,
        BuffId::Keen => &KEEN,
    }
}

// ============================================================================
// Debuffs
// ============================================================================

static ATTACK_DOWN: DebuffDefinition = DebuffDefinition {
    id: DebuffId::AttackDown,
    name: "Attack Down",
    modifier: Modifier::Scale {
        stat: Stat::Atk,
        percent: 70,
    },
    duration: 3,
    stacking: StackingRule::stacking(3),
};

static DEFENSE_DOWN: DebuffDefinition = DebuffDefinition {
    id: DebuffId::DefenseDown,
    name: "Defense Down",
    modifier: Modifier::Scale {
        stat: Stat::Def,
        percent: 70,
    },
    duration: 3,
    stacking: StackingRule::stacking(3),
};

static SPEED_DOWN: DebuffDefinition = DebuffDefinition {
    id: DebuffId::SpeedDown,
    name: "Speed Down",
    modifier: Modifier::Scale {
        stat: Stat::Spd,
        percent: 60,
    },
    duration: 2,
    stacking: StackingRule::stacking(2),
};

static VULNERABILITY: DebuffDefinition = DebuffDefinition {
    id: DebuffId::Vulnerability,
    name: "Vulnerability",
    modifier: Modifier::Scale {
        stat: Stat::ElemDef,
        percent: 50,
    },
    duration: 3,
    stacking: StackingRule::refresh(),
};

pub fn debuff_definition(id: DebuffId) -> &'static DebuffDefinition {
    match id {
        DebuffId::AttackDown => &ATTACK_DOWN,
        DebuffId::DefenseDown => &DEFENSE_DOWN,
        DebuffId::SpeedDown => &SPEED_DOWN,
        DebuffId::Vulnerability => &VULNERABILITY,
    }
}

// ============================================================================
// Statuses
// ============================================================================

static POISON: StatusDefinition = StatusDefinition {
    id: StatusId::Poison,
    name: "Poison",
    damage_per_round: 15,
    duration: 5,
    stacking: StackingRule::stacking(3),
    prevents_action: false,
};

static BLEED: StatusDefinition = StatusDefinition {
    id: StatusId::Bleed,
    name: "Bleed",
    damage_per_round: 20,
    duration: 4,
    stacking: StackingRule::stacking(2),
    prevents_action: false,
};

static BURN: StatusDefinition = StatusDefinition {
    id: StatusId::Burn,
    name: "Burn",
    damage_per_round: 25,
    duration: 3,
    stacking: StackingRule::stacking(2),
    prevents_action: false,
};

static FREEZE: StatusDefinition = StatusDefinition {
    id: StatusId::Freeze,
    name: "Freeze",
    damage_per_round: 0,
    duration: 2,
    stacking: StackingRule::refresh(),
    prevents_action: true,
};

// Duration 1: only costs a turn the target has not taken yet this round.
static STUN: StatusDefinition = StatusDefinition {
    id: StatusId::Stun,
    name: "Stun",
    damage_per_round: 0,
    duration: 1,
    stacking: StackingRule::ignore(),
    prevents_action: true,
};

pub fn status_definition(id: StatusId) -> &'static StatusDefinition {
    match id {
        StatusId::Poison => &POISON,
        StatusId::Bleed => &BLEED,
        StatusId::Burn => &BURN,
        StatusId::Freeze => &FREEZE,
        StatusId::Stun => &STUN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_id_resolves_to_its_own_definition() {
        for id in BuffId::iter() {
            assert_eq!(buff_definition(id).id, id);
        }
        for id in DebuffId::iter() {
            assert_eq!(debuff_definition(id).id, id);
        }
        for id in StatusId::iter() {
            assert_eq!(status_definition(id).id, id);
        }
    }

    #[test]
    fn stacking_rules_are_consistent() {
        let rules = BuffId::iter()
            .map(|id| buff_definition(id).stacking)
            .chain(DebuffId::iter().map(|id| debuff_definition(id).stacking))
            .chain(StatusId::iter().map(|id| status_definition(id).stacking));

        for rule in rules {
            assert!(rule.max_stacks >= 1);
            if !rule.stackable {
                assert_eq!(rule.max_stacks, 1);
                assert_ne!(rule.overwrite, OverwriteRule::Stack);
            }
        }
    }

    #[test]
    fn ids_use_snake_case_names() {
        assert_eq!(BuffId::ElementalShield.as_ref(), "elemental_shield");
        assert_eq!("attack_down".parse::<DebuffId>().ok(), Some(DebuffId::AttackDown));
        assert!("curse".parse::<StatusId>().is_err());
    }
}
