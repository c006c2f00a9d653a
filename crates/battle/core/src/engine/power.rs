use crate::model::{Character, Effect, SkillKind};

/// Deterministic power rating of a character template.
///
/// # Formula
///
/// ```text
/// stats  = (hp*3 + atk*10 + def*8 + spd*6 + elem_atk*10 + elem_def*8) / 10
/// skill  = power * accuracy / 10000 / (1 + cooldown)  + 5 per effect
/// rating = stats + sum(skill) / 2 + 10 per passive
/// ```
///
/// Only used for matchmaking and reporting; the simulation never reads it.
pub fn calculate_power(character: &Character) -> u64 {
    let stats = &character.stats;
    let stat_rating = (stats.hp as u64 * 3
        + stats.atk as u64 * 10
        + stats.def as u64 * 8
        + stats.spd as u64 * 6
        + stats.elem_atk as u64 * 10
        + stats.elem_def as u64 * 8)
        / 10;

    let skill_rating: u64 = character
        .skills
        .iter()
        .map(|skill| {
            let offensive = if skill.kind == SkillKind::Support {
                0
            } else {
                skill.power as u64 * skill.accuracy.bps() as u64 / 10_000
            };
            offensive / (1 + skill.cooldown as u64) + effects_rating(&skill.effects)
        })
        .sum();

    stat_rating + skill_rating / 2 + character.passives.len() as u64 * 10
}

fn effects_rating(effects: &[Effect]) -> u64 {
    effects.len() as u64 * 5
}
