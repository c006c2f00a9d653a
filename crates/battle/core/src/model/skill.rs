use super::{Chance, Effect, Element};

/// Which stat pair a skill's damage uses.
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
pub enum SkillKind {
    /// `atk` against `def`.
    Physical,
    /// `elem_atk` against `elem_def`.
    Magical,
    /// No damage roll; effects only.
    Support,
}

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
pub enum TargetRule {
    SingleEnemy,
    AllEnemies,
    Caster,
    /// Living ally (the caster included) with the lowest current HP.
    LowestHpAlly,
}

/// An active ability.
///
/// `power` is a percentage of the attacking stat: 100 deals the stat as raw
/// damage. Support skills and skills with zero power never deal direct damage.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub kind: SkillKind,
    /// Falls back to the caster's element when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Option<Element>,
    pub power: u32,
    pub accuracy: Chance,
    pub target: TargetRule,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
    /// Rounds the skill stays unavailable after use.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u8,
}

impl Skill {
    pub const BASIC_ATTACK_ID: &'static str = "basic_attack";

    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: SkillKind,
        power: u32,
        accuracy: Chance,
        target: TargetRule,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            element: None,
            power,
            accuracy,
            target,
            effects: Vec::new(),
            cooldown: 0,
        }
    }

    /// Fallback used when no declared skill is ready.
    pub fn basic_attack() -> Self {
        Self::new(
            Self::BASIC_ATTACK_ID,
            "Basic Attack",
            SkillKind::Physical,
            100,
            Chance::percent(95),
            TargetRule::SingleEnemy,
        )
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_cooldown(mut self, cooldown: u8) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// True when a hit from this skill rolls damage.
    pub fn deals_damage(&self) -> bool {
        self.power > 0 && self.kind != SkillKind::Support
    }
}
