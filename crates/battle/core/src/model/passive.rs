use super::Effect;

/// Moment at which a passive fires.
///
/// `OnHit` and `OnCrit` fire for the attacker, `OnDamageTaken` for a defender
/// that survives the hit, `OnKill` for the attacker and `OnDeath` for the
/// defeated participant.
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
pub enum PassiveTrigger {
    OnBattleStart,
    OnTurnStart,
    OnHit,
    OnCrit,
    OnDamageTaken,
    OnKill,
    OnDeath,
}

/// Always-on ability that applies one effect when its trigger fires.
///
/// Effects applied by a passive never trigger further passives.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveAbility {
    pub id: String,
    pub name: String,
    pub trigger: PassiveTrigger,
    pub effect: Effect,
}

impl PassiveAbility {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        trigger: PassiveTrigger,
        effect: Effect,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            trigger,
            effect,
        }
    }
}
