use crate::balance::formulas;
use crate::error::ValidationError;
use crate::model::Chance;

/// How a match that reaches `max_rounds` is decided.
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
pub enum RoundLimitPolicy {
    /// Side with more total remaining HP wins; equal totals draw.
    #[default]
    HigherRemainingHp,
    /// Always a draw.
    Draw,
}

/// Which living enemy a single-target skill hits.
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
pub enum TargetPolicy {
    #[default]
    LowestCurrentHp,
    HighestCurrentHp,
    FirstAlive,
}

/// Which ready skill an actor uses on its turn.
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
pub enum SkillPolicy {
    /// First skill in declaration order whose cooldown is zero.
    #[default]
    FirstReady,
    /// Ready skill with the highest power; ties keep declaration order.
    StrongestReady,
}

/// Battle configuration constants and tunable parameters.
///
/// A match takes a snapshot of this value at creation, so later changes to a
/// shared config never affect a match in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BattleConfig {
    /// Rounds before the round-limit policy decides the match.
    pub max_rounds: u32,
    /// Party size accepted by `create_match`, at most [`Self::MAX_PARTY_SIZE`].
    pub max_party_size: usize,
    /// Floor applied to every damaging hit.
    pub min_damage: u32,
    /// Base critical chance before buff modifiers.
    pub crit_chance: Chance,
    /// Critical damage multiplier in percent (150 = x1.5).
    pub crit_multiplier: u32,
    /// Defense at which armor halves incoming damage.
    pub armor_constant: u32,
    /// Evasion granted per point of effective speed, in basis points.
    pub evasion_per_speed: u16,
    pub round_limit_policy: RoundLimitPolicy,
    pub target_policy: TargetPolicy,
    pub skill_policy: SkillPolicy,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Hard capacity of one party.
    pub const MAX_PARTY_SIZE: usize = 6;
    pub const MAX_SKILLS: usize = 8;
    pub const MAX_PASSIVES: usize = 4;
    pub const MAX_SKILL_EFFECTS: usize = 4;
    /// Per category (buffs, debuffs, statuses) on one participant.
    pub const MAX_ACTIVE_EFFECTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_ROUNDS: u32 = 50;
    pub const DEFAULT_MAX_PARTY_SIZE: usize = 5;

    pub fn new() -> Self {
        Self {
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            max_party_size: Self::DEFAULT_MAX_PARTY_SIZE,
            min_damage: formulas::DEFAULT_MIN_DAMAGE,
            crit_chance: formulas::DEFAULT_CRIT_CHANCE,
            crit_multiplier: formulas::DEFAULT_CRIT_MULTIPLIER,
            armor_constant: formulas::DEFAULT_ARMOR_CONSTANT,
            evasion_per_speed: formulas::DEFAULT_EVASION_PER_SPEED,
            round_limit_policy: RoundLimitPolicy::default(),
            target_policy: TargetPolicy::default(),
            skill_policy: SkillPolicy::default(),
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_crit_chance(mut self, crit_chance: Chance) -> Self {
        self.crit_chance = crit_chance;
        self
    }

    pub fn with_round_limit_policy(mut self, policy: RoundLimitPolicy) -> Self {
        self.round_limit_policy = policy;
        self
    }

    pub fn with_target_policy(mut self, policy: TargetPolicy) -> Self {
        self.target_policy = policy;
        self
    }

    pub fn with_skill_policy(mut self, policy: SkillPolicy) -> Self {
        self.skill_policy = policy;
        self
    }

    /// Rejects values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |reason| Err(ValidationError::InvalidConfig { reason });

        if self.max_rounds == 0 {
            return invalid("max_rounds must be at least 1");
        }
        if self.max_party_size == 0 {
            return invalid("max_party_size must be at least 1");
        }
        if self.max_party_size > Self::MAX_PARTY_SIZE {
            return invalid("max_party_size exceeds party capacity");
        }
        if self.crit_multiplier < 100 {
            return invalid("crit_multiplier must be at least 100");
        }
        if self.armor_constant == 0 {
            return invalid("armor_constant must be positive");
        }
        if !self.crit_chance.is_valid() {
            return invalid("crit_chance exceeds 10000 basis points");
        }
        Ok(())
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
