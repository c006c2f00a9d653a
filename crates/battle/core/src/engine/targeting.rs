//! Skill and target selection policies.

use super::BattleState;
use crate::config::{SkillPolicy, TargetPolicy};
use crate::event::SkillRef;
use crate::model::{Character, Skill, TargetRule};
use crate::state::{Participant, Slot, Vitals};

/// Picks the skill an actor uses this turn.
///
/// Only declared skills with a zero cooldown counter are candidates; the
/// basic attack is used when none is ready.
pub fn select_skill<'s>(
    character: &'s Character,
    vitals: &Vitals,
    policy: SkillPolicy,
    basic_attack: &'s Skill,
) -> (SkillRef, &'s Skill) {
    let mut ready = character
        .skills
        .iter()
        .enumerate()
        .filter(|(index, _)| vitals.cooldown(*index) == Some(0));

    let chosen = match policy {
        SkillPolicy::FirstReady => ready.next(),
        SkillPolicy::StrongestReady => {
            // Strictly greater keeps declaration order on ties.
            let mut best: Option<(usize, &Skill)> = None;
            for (index, skill) in ready {
                if best.is_none_or(|(_, current)| skill.power > current.power) {
                    best = Some((index, skill));
                }
            }
            best
        }
    };

    match chosen {
        Some((index, skill)) => (SkillRef::Declared(index as u8), skill),
        None => (SkillRef::Basic, basic_attack),
    }
}

/// Resolves a skill's target rule to concrete slots, in slot order for
/// multi-target rules. Empty when no valid target is alive.
pub fn select_targets(
    state: &BattleState,
    actor: Slot,
    rule: TargetRule,
    policy: TargetPolicy,
) -> Vec<Slot> {
    let enemy_side = actor.side.opponent();

    match rule {
        TargetRule::Caster => vec![actor],
        TargetRule::AllEnemies => state.living(enemy_side).map(|p| p.slot).collect(),
        TargetRule::SingleEnemy => pick(state.living(enemy_side), policy).into_iter().collect(),
        TargetRule::LowestHpAlly => pick(state.living(actor.side), TargetPolicy::LowestCurrentHp)
            .into_iter()
            .collect(),
    }
}

fn pick<'p>(candidates: impl Iterator<Item = &'p Participant>, policy: TargetPolicy) -> Option<Slot> {
    let mut best: Option<&Participant> = None;
    for candidate in candidates {
        let better = match (best, policy) {
            (None, _) => true,
            (Some(_), TargetPolicy::FirstAlive) => false,
            (Some(current), TargetPolicy::LowestCurrentHp) => candidate.hp() < current.hp(),
            (Some(current), TargetPolicy::HighestCurrentHp) => candidate.hp() > current.hp(),
        };
        if better {
            best = Some(candidate);
        }
    }
    best.map(|p| p.slot)
}
