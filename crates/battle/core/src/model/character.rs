use super::{CharacterStats, Effect, Element, PassiveAbility, Rarity, Skill};
use crate::config::BattleConfig;
use crate::error::ValidationError;

/// Stable identifier of a character template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct CharacterId(pub u32);

impl core::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Character template. Matches share templates through `Arc` and never
/// mutate them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub element: Element,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    pub stats: CharacterStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<Skill>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passives: Vec<PassiveAbility>,
}

impl Character {
    pub fn new(
        id: CharacterId,
        name: impl Into<String>,
        element: Element,
        stats: CharacterStats,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            element,
            rarity: Rarity::default(),
            stats,
            skills: Vec::new(),
            passives: Vec::new(),
        }
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }

    pub fn with_passive(mut self, passive: PassiveAbility) -> Self {
        self.passives.push(passive);
        self
    }

    /// Checks the template against engine capacities and value ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |reason| {
            Err(ValidationError::InvalidCharacter {
                character: self.id,
                reason,
            })
        };

        if self.stats.hp == 0 {
            return invalid("hp must be positive");
        }
        if self.skills.len() > BattleConfig::MAX_SKILLS {
            return invalid("too many skills");
        }
        if self.passives.len() > BattleConfig::MAX_PASSIVES {
            return invalid("too many passives");
        }
        for skill in &self.skills {
            if !skill.accuracy.is_valid() {
                return invalid("skill accuracy exceeds 10000 basis points");
            }
            if skill.effects.len() > BattleConfig::MAX_SKILL_EFFECTS {
                return invalid("skill carries too many effects");
            }
            if skill.effects.iter().any(Self::is_empty_effect) {
                return invalid("skill carries an effect with zero amount");
            }
        }
        if self
            .passives
            .iter()
            .any(|passive| Self::is_empty_effect(&passive.effect))
        {
            return invalid("passive carries an effect with zero amount");
        }
        Ok(())
    }

    fn is_empty_effect(effect: &Effect) -> bool {
        match effect {
            Effect::Damage(e) => e.amount == 0,
            Effect::Heal(e) => e.amount == 0,
            Effect::Buff(_) | Effect::Debuff(_) | Effect::Status(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chance, SkillKind, TargetRule};

    fn knight() -> Character {
        Character::new(
            CharacterId(1),
            "Knight",
            Element::Neutral,
            CharacterStats::new(100, 20, 10, 10, 0, 5),
        )
    }

    #[test]
    fn valid_template_passes() {
        let character = knight().with_skill(Skill::basic_attack());
        assert!(character.validate().is_ok());
    }

    #[test]
    fn rejects_zero_hp_and_bad_accuracy() {
        let mut character = knight();
        character.stats.hp = 0;
        assert!(character.validate().is_err());

        let mut skill = Skill::new(
            "slash",
            "Slash",
            SkillKind::Physical,
            120,
            Chance::percent(90),
            TargetRule::SingleEnemy,
        );
        skill.accuracy = Chance::CERTAIN;
        assert!(knight().with_skill(skill.clone()).validate().is_ok());

        let overflowing = knight().with_skill(Skill {
            accuracy: Chance::unchecked(12_000),
            ..skill
        });
        assert_eq!(
            overflowing.validate(),
            Err(ValidationError::InvalidCharacter {
                character: CharacterId(1),
                reason: "skill accuracy exceeds 10000 basis points",
            })
        );
    }

    #[test]
    fn rejects_too_many_skills() {
        let mut character = knight();
        for _ in 0..=BattleConfig::MAX_SKILLS {
            character = character.with_skill(Skill::basic_attack());
        }
        assert!(character.validate().is_err());
    }
}
