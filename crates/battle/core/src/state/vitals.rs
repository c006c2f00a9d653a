use arrayvec::ArrayVec;

use super::{ActiveEffect, Application, EffectRef, EffectStack, ParticipantSnapshot, Slot};
use crate::balance::{
    BuffId, DebuffId, Modifier, StatusId, buff_definition, debuff_definition, status_definition,
};
use crate::config::BattleConfig;
use crate::model::{Chance, CharacterId, CharacterStats, Stat};

/// Everything about a participant that changes during a match.
///
/// Kept separate from the character template so replay can rebuild it from
/// the roster header alone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    hp: u32,
    max_hp: u32,
    buffs: EffectStack<BuffId>,
    debuffs: EffectStack<DebuffId>,
    statuses: EffectStack<StatusId>,
    cooldowns: ArrayVec<u8, { BattleConfig::MAX_SKILLS }>,
}

impl Vitals {
    /// Full HP, no effects, every skill ready.
    pub fn new(max_hp: u32, skill_count: usize) -> Self {
        let mut cooldowns = ArrayVec::new();
        for _ in 0..skill_count.min(BattleConfig::MAX_SKILLS) {
            cooldowns.push(0);
        }
        Self {
            hp: max_hp,
            max_hp,
            buffs: EffectStack::new(),
            debuffs: EffectStack::new(),
            statuses: EffectStack::new(),
            cooldowns,
        }
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn buffs(&self) -> &EffectStack<BuffId> {
        &self.buffs
    }

    pub fn debuffs(&self) -> &EffectStack<DebuffId> {
        &self.debuffs
    }

    pub fn statuses(&self) -> &EffectStack<StatusId> {
        &self.statuses
    }

    /// Reduces HP, never below zero. Returns the HP actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        dealt
    }

    /// Restores HP up to max. Defeated participants cannot be healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let restored = amount.min(self.max_hp - self.hp);
        self.hp += restored;
        restored
    }

    pub fn apply_buff(&mut self, id: BuffId) -> Application {
        let def = buff_definition(id);
        self.buffs.apply(id, def.duration, def.stacking)
    }

    pub fn apply_debuff(&mut self, id: DebuffId) -> Application {
        let def = debuff_definition(id);
        self.debuffs.apply(id, def.duration, def.stacking)
    }

    pub fn apply_status(&mut self, id: StatusId) -> Application {
        let def = status_definition(id);
        self.statuses.apply(id, def.duration, def.stacking)
    }

    /// Base stat scaled by every matching buff then debuff stack.
    ///
    /// A positive base never drops below 1.
    pub fn effective_stat(&self, base: &CharacterStats, stat: Stat) -> u32 {
        let base_value = base.get(stat) as u64;
        let modifiers = self
            .buffs
            .iter()
            .map(|e| (buff_definition(e.id).modifier, e.stacks))
            .chain(
                self.debuffs
                    .iter()
                    .map(|e| (debuff_definition(e.id).modifier, e.stacks)),
            );

        let mut value = base_value;
        for (modifier, stacks) in modifiers {
            match modifier {
                Modifier::Scale {
                    stat: scaled,
                    percent,
                } if scaled == stat => {
                    for _ in 0..stacks {
                        value = value.saturating_mul(percent as u64) / 100;
                    }
                }
                _ => {}
            }
        }

        if base_value > 0 {
            value = value.max(1);
        }
        value.min(u32::MAX as u64) as u32
    }

    /// Critical chance bonuses contributed by active effects.
    pub fn crit_modifiers(&self) -> impl Iterator<Item = Chance> + '_ {
        let from_buffs = self.buffs.iter().map(|e| (buff_definition(e.id).modifier, e.stacks));
        let from_debuffs = self
            .debuffs
            .iter()
            .map(|e| (debuff_definition(e.id).modifier, e.stacks));

        from_buffs
            .chain(from_debuffs)
            .filter_map(|(modifier, stacks)| match modifier {
                Modifier::CritChance(bonus) => Some((bonus, stacks)),
                Modifier::Scale { .. } => None,
            })
            .flat_map(|(bonus, stacks)| core::iter::repeat(bonus).take(stacks as usize))
    }

    /// First active status that costs the holder its turn.
    pub fn action_blocker(&self) -> Option<StatusId> {
        self.statuses
            .iter()
            .map(|e| e.id)
            .find(|id| status_definition(*id).prevents_action)
    }

    /// Remaining cooldown of a declared skill, `None` if out of range.
    pub fn cooldown(&self, skill: usize) -> Option<u8> {
        self.cooldowns.get(skill).copied()
    }

    pub fn skill_count(&self) -> usize {
        self.cooldowns.len()
    }

    /// Returns false when `skill` is out of range.
    pub fn set_cooldown(&mut self, skill: usize, rounds: u8) -> bool {
        match self.cooldowns.get_mut(skill) {
            Some(cooldown) => {
                *cooldown = rounds;
                true
            }
            None => false,
        }
    }

    /// Drops every active effect. Applied on defeat.
    pub fn clear_effects(&mut self) {
        self.buffs.clear();
        self.debuffs.clear();
        self.statuses.clear();
    }

    /// Round-end decay: effect durations, then cooldowns.
    ///
    /// Returns expired effects: buffs, then debuffs, then statuses, each in
    /// insertion order.
    pub fn tick(&mut self) -> Vec<EffectRef> {
        let mut expired: Vec<EffectRef> = self.buffs.tick().into_iter().map(EffectRef::Buff).collect();
        expired.extend(self.debuffs.tick().into_iter().map(EffectRef::Debuff));
        expired.extend(self.statuses.tick().into_iter().map(EffectRef::Status));

        for cooldown in self.cooldowns.iter_mut() {
            *cooldown = cooldown.saturating_sub(1);
        }
        expired
    }

    pub fn snapshot(&self, slot: Slot, character: CharacterId) -> ParticipantSnapshot {
        fn collect<K: Copy + Eq>(stack: &EffectStack<K>) -> Vec<ActiveEffect<K>> {
            stack.iter().copied().collect()
        }

        ParticipantSnapshot {
            slot,
            character,
            hp: self.hp,
            max_hp: self.max_hp,
            alive: self.is_alive(),
            buffs: collect(&self.buffs),
            debuffs: collect(&self.debuffs),
            statuses: collect(&self.statuses),
            cooldowns: self.cooldowns.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StackOutcome;

    fn stats() -> CharacterStats {
        CharacterStats::new(100, 50, 20, 10, 40, 30)
    }

    #[test]
    fn damage_and_heal_are_clamped() {
        let mut vitals = Vitals::new(100, 0);
        assert_eq!(vitals.take_damage(30), 30);
        assert_eq!(vitals.heal(50), 30);
        assert_eq!(vitals.hp(), 100);
        assert_eq!(vitals.take_damage(500), 100);
        assert!(!vitals.is_alive());
        assert_eq!(vitals.heal(10), 0);
    }

    #[test]
    fn buffs_and_debuffs_scale_stats_per_stack() {
        let mut vitals = Vitals::new(100, 0);
        vitals.apply_buff(BuffId::AttackUp);
        assert_eq!(vitals.effective_stat(&stats(), Stat::Atk), 65);
        vitals.apply_buff(BuffId::AttackUp);
        // 50 * 1.3 = 65, 65 * 1.3 = 84 (integer)
        assert_eq!(vitals.effective_stat(&stats(), Stat::Atk), 84);

        vitals.apply_debuff(DebuffId::AttackDown);
        assert_eq!(vitals.effective_stat(&stats(), Stat::Atk), 58);
        assert_eq!(vitals.effective_stat(&stats(), Stat::Def), 20);
    }

    #[test]
    fn positive_stats_never_reach_zero() {
        let base = CharacterStats::new(10, 1, 1, 1, 0, 1);
        let mut vitals = Vitals::new(10, 0);
        vitals.apply_debuff(DebuffId::SpeedDown);
        vitals.apply_debuff(DebuffId::SpeedDown);
        assert_eq!(vitals.effective_stat(&base, Stat::Spd), 1);
        assert_eq!(vitals.effective_stat(&base, Stat::ElemAtk), 0);
    }

    #[test]
    fn keen_adds_crit_bonus() {
        let mut vitals = Vitals::new(10, 0);
        assert_eq!(vitals.crit_modifiers().count(), 0);
        assert_eq!(vitals.apply_buff(BuffId::Keen).outcome, StackOutcome::Applied);
        let bonuses: Vec<_> = vitals.crit_modifiers().collect();
        assert_eq!(bonuses, vec![Chance::from_bps(1_500)]);
    }

    #[test]
    fn tick_expires_effects_and_decrements_cooldowns() {
        let mut vitals = Vitals::new(100, 2);
        vitals.set_cooldown(1, 2);
        vitals.apply_status(StatusId::Stun);
        vitals.apply_buff(BuffId::SpeedUp);
        assert_eq!(vitals.action_blocker(), Some(StatusId::Stun));

        let expired = vitals.tick();
        assert_eq!(expired, vec![EffectRef::Status(StatusId::Stun)]);
        assert_eq!(vitals.action_blocker(), None);
        assert_eq!(vitals.cooldown(1), Some(1));

        let expired = vitals.tick();
        assert_eq!(expired, vec![EffectRef::Buff(BuffId::SpeedUp)]);
        assert_eq!(vitals.cooldown(1), Some(0));
        assert!(!vitals.set_cooldown(5, 1));
    }
}
