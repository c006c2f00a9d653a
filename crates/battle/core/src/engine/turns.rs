use super::{BattleEngine, targeting};
use crate::error::EngineError;
use crate::event::EventKind;
use crate::model::{PassiveTrigger, Stat};
use crate::state::Slot;

/// Ranking key of one participant for the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TurnKey {
    speed: u32,
    draw: u32,
    position: usize,
    slot: Slot,
}

/// Turn scheduling methods for BattleEngine.
impl<'a> BattleEngine<'a> {
    /// Ranks living participants for this round.
    ///
    /// Every living participant draws one tie-break value in slot order, then
    /// the order is effective speed (descending), draw (descending), slot.
    pub(super) fn roll_turn_order(&mut self) -> Vec<Slot> {
        let living: Vec<(usize, Slot, u32)> = self
            .state
            .participants()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_alive())
            .map(|(position, p)| (position, p.slot, p.effective_stat(Stat::Spd)))
            .collect();

        let mut keys: Vec<TurnKey> = living
            .into_iter()
            .map(|(position, slot, speed)| TurnKey {
                speed,
                draw: self.state.rng.next_u32(),
                position,
                slot,
            })
            .collect();

        keys.sort_by(|a, b| {
            b.speed
                .cmp(&a.speed)
                .then(b.draw.cmp(&a.draw))
                .then(a.position.cmp(&b.position))
        });
        keys.into_iter().map(|key| key.slot).collect()
    }

    /// Plays one actor's turn. Actors defeated earlier in the round are skipped
    /// without an event.
    pub(super) fn take_turn(&mut self, actor: Slot) -> Result<(), EngineError> {
        let participant = self.state.require(actor)?;
        if !participant.is_alive() {
            return Ok(());
        }
        if let Some(status) = participant.vitals.action_blocker() {
            self.state.record(EventKind::TurnSkipped { actor, status });
            return Ok(());
        }

        self.state.record(EventKind::TurnStarted { actor });
        self.trigger_passives(actor, PassiveTrigger::OnTurnStart, None)?;
        if !self.state.is_alive(actor) || self.decision().is_some() {
            return Ok(());
        }

        let basic_attack = self.basic_attack;
        let participant = self.state.require(actor)?;
        let character = participant.character.clone();
        let (skill_ref, skill) = targeting::select_skill(
            &character,
            &participant.vitals,
            self.config.skill_policy,
            basic_attack,
        );

        let targets =
            targeting::select_targets(self.state, actor, skill.target, self.config.target_policy);
        if targets.is_empty() {
            return Ok(());
        }

        self.resolve_skill(actor, skill_ref, skill, targets)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::BattleConfig;
    use crate::engine::{BattleState, create_match};
    use crate::model::{Character, CharacterId, CharacterStats, Element, Skill};
    use crate::state::Side;

    fn with_speed(id: u32, spd: u32) -> Arc<Character> {
        Arc::new(Character::new(
            CharacterId(id),
            format!("Runner {id}"),
            Element::Neutral,
            CharacterStats::new(100, 10, 10, spd, 10, 10),
        ))
    }

    #[test]
    fn faster_participant_acts_first() {
        for seed in 0..32 {
            let battle =
                create_match(vec![with_speed(1, 50)], vec![with_speed(2, 100)], "order", None, seed)
                    .expect("valid match");
            let mut state = BattleState::new(&battle);
            let basic = Skill::basic_attack();
            let config = BattleConfig::default();
            let mut engine = BattleEngine::new(&mut state, &config, &basic);

            let order = engine.roll_turn_order();
            assert_eq!(order, vec![Slot::new(Side::B, 0), Slot::new(Side::A, 0)]);
        }
    }

    #[test]
    fn equal_speed_ties_depend_on_seed_not_slot() {
        let mut firsts = std::collections::HashSet::new();
        for seed in 0..64 {
            let battle =
                create_match(vec![with_speed(1, 30)], vec![with_speed(2, 30)], "tie", None, seed)
                    .expect("valid match");
            let mut state = BattleState::new(&battle);
            let basic = Skill::basic_attack();
            let config = BattleConfig::default();
            let mut engine = BattleEngine::new(&mut state, &config, &basic);
            firsts.insert(engine.roll_turn_order()[0]);
        }
        assert_eq!(firsts.len(), 2);
    }
}
