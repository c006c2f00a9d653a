//! Skill, effect and round-end resolution.

use super::BattleEngine;
use crate::balance::{crit_chance, status_definition};
use crate::combat::{self, DamageInput};
use crate::error::EngineError;
use crate::event::{EventKind, SkillRef};
use crate::model::{Effect, EffectTarget, PassiveTrigger, Skill, SkillKind, Stat};
use crate::state::{Slot, StackOutcome};

/// Where a state change came from. Passive-sourced changes never trigger
/// passives; round-end ticks only trigger on-death.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Origin {
    Skill,
    Passive,
    Tick,
}

impl<'a> BattleEngine<'a> {
    pub(super) fn resolve_skill(
        &mut self,
        actor: Slot,
        skill_ref: SkillRef,
        skill: &Skill,
        targets: Vec<Slot>,
    ) -> Result<(), EngineError> {
        // The counter includes the current round, so a cooldown of N blocks
        // the next N rounds.
        let cooldown = match skill_ref {
            SkillRef::Declared(index) => {
                let counter = skill.cooldown.saturating_add(1);
                self.state
                    .require_mut(actor)?
                    .vitals
                    .set_cooldown(index as usize, counter);
                counter
            }
            SkillRef::Basic => 0,
        };

        self.state.record(EventKind::SkillUsed {
            actor,
            skill: skill_ref,
            targets: targets.clone(),
            cooldown,
        });

        for target in targets {
            if !self.state.is_alive(actor) {
                break;
            }
            if !self.state.is_alive(target) {
                continue;
            }
            self.resolve_against(actor, skill, target)?;
        }
        Ok(())
    }

    /// One skill against one target: accuracy roll, crit roll, damage, effects.
    ///
    /// Targets on the caster's own side are never rolled against.
    fn resolve_against(&mut self, actor: Slot, skill: &Skill, target: Slot) -> Result<(), EngineError> {
        if !actor.is_ally_of(target) {
            let defender_speed = self.state.require(target)?.effective_stat(Stat::Spd);
            let roll = self.state.rng.roll_bps();
            if !combat::check_hit(skill.accuracy, defender_speed, self.config.evasion_per_speed, roll) {
                self.state.tally.misses += 1;
                self.state.record(EventKind::Missed { actor, target });
                return Ok(());
            }

            if skill.deals_damage() {
                self.strike(actor, skill, target)?;
            }
        }

        for effect in &skill.effects {
            self.apply_effect(actor, effect, target, Origin::Skill)?;
        }
        Ok(())
    }

    fn strike(&mut self, actor: Slot, skill: &Skill, target: Slot) -> Result<(), EngineError> {
        let attacker = self.state.require(actor)?;
        let defender = self.state.require(target)?;

        let (attack_stat, defense_stat) = match skill.kind {
            SkillKind::Magical => (Stat::ElemAtk, Stat::ElemDef),
            SkillKind::Physical | SkillKind::Support => (Stat::Atk, Stat::Def),
        };
        let attack_element = skill.element.unwrap_or(attacker.character.element);
        let defender_element = defender.character.element;
        let chance = crit_chance(self.config.crit_chance, attacker.vitals.crit_modifiers());
        let attack = attacker.effective_stat(attack_stat);
        let defense = defender.effective_stat(defense_stat);

        let critical = chance.succeeds(self.state.rng.roll_bps());
        let input = DamageInput {
            attack,
            defense,
            power: skill.power,
            attack_element,
            defender_element,
            critical,
        };
        let damage = combat::calculate_damage(
            &input,
            self.config.armor_constant,
            self.config.crit_multiplier,
            self.config.min_damage,
        );

        let dealt = self.state.require_mut(target)?.vitals.take_damage(damage);
        let hp_after = self.state.require(target)?.hp();
        self.credit_damage(actor, dealt)?;
        if critical {
            self.state.tally.critical_hits += 1;
        }
        self.state.record(EventKind::Hit {
            actor,
            target,
            damage,
            critical,
            elemental: crate::balance::elemental_multiplier(attack_element, defender_element),
            hp_after,
        });

        self.trigger_passives(actor, PassiveTrigger::OnHit, Some(target))?;
        if critical {
            self.trigger_passives(actor, PassiveTrigger::OnCrit, Some(target))?;
        }
        self.after_damage(target, Some(actor), Origin::Skill)
    }

    /// Defeat handling or the defender's damage-taken passives.
    fn after_damage(&mut self, target: Slot, by: Option<Slot>, origin: Origin) -> Result<(), EngineError> {
        if self.state.is_alive(target) {
            if origin == Origin::Skill {
                if let Some(attacker) = by {
                    self.trigger_passives(target, PassiveTrigger::OnDamageTaken, Some(attacker))?;
                }
            }
            return Ok(());
        }
        self.defeat(target, by, origin)
    }

    fn defeat(&mut self, target: Slot, by: Option<Slot>, origin: Origin) -> Result<(), EngineError> {
        self.state.require_mut(target)?.vitals.clear_effects();
        let position = self.position(target)?;
        let round = self.state.round();
        self.state.tally.add_defeat(round, position);
        self.state.record(EventKind::Defeated { target, by });

        if origin == Origin::Passive {
            return Ok(());
        }
        self.trigger_passives(target, PassiveTrigger::OnDeath, by)?;
        if let Some(killer) = by {
            self.trigger_passives(killer, PassiveTrigger::OnKill, Some(target))?;
        }
        Ok(())
    }

    /// Applies one effect. `counterpart` is who `EffectTarget::Target` means.
    pub(super) fn apply_effect(
        &mut self,
        source: Slot,
        effect: &Effect,
        counterpart: Slot,
        origin: Origin,
    ) -> Result<(), EngineError> {
        let recipient = match effect.target() {
            EffectTarget::Caster => source,
            EffectTarget::Target => counterpart,
        };
        if !self.state.is_alive(recipient) {
            return Ok(());
        }

        match *effect {
            Effect::Damage(damage) => {
                let dealt = self.state.require_mut(recipient)?.vitals.take_damage(damage.amount);
                let hp_after = self.state.require(recipient)?.hp();
                if !source.is_ally_of(recipient) {
                    self.credit_damage(source, dealt)?;
                }
                self.state.record(EventKind::EffectDamage {
                    source,
                    target: recipient,
                    damage: damage.amount,
                    hp_after,
                });
                let by = (recipient != source).then_some(source);
                self.after_damage(recipient, by, origin)?;
            }
            Effect::Heal(heal) => {
                let restored = self.state.require_mut(recipient)?.vitals.heal(heal.amount);
                let hp_after = self.state.require(recipient)?.hp();
                let position = self.position(source)?;
                let round = self.state.round();
                self.state.tally.add_healing(round, position, restored);
                self.state.record(EventKind::Healed {
                    source,
                    target: recipient,
                    amount: restored,
                    hp_after,
                });
            }
            Effect::Buff(buff) => {
                let application = self.state.require_mut(recipient)?.vitals.apply_buff(buff.id);
                if application.outcome != StackOutcome::Ignored {
                    *self.state.tally.buffs.entry(buff.id).or_default() += 1;
                }
                self.state.record(EventKind::BuffApplied {
                    source,
                    target: recipient,
                    buff: buff.id,
                    application,
                });
            }
            Effect::Debuff(debuff) => {
                let application = self.state.require_mut(recipient)?.vitals.apply_debuff(debuff.id);
                if application.outcome != StackOutcome::Ignored {
                    *self.state.tally.debuffs.entry(debuff.id).or_default() += 1;
                }
                self.state.record(EventKind::DebuffApplied {
                    source,
                    target: recipient,
                    debuff: debuff.id,
                    application,
                });
            }
            Effect::Status(status) => {
                let application = self.state.require_mut(recipient)?.vitals.apply_status(status.id);
                if application.outcome != StackOutcome::Ignored {
                    *self.state.tally.statuses.entry(status.id).or_default() += 1;
                }
                self.state.record(EventKind::StatusApplied {
                    source,
                    target: recipient,
                    status: status.id,
                    application,
                });
            }
        }
        Ok(())
    }

    /// Round-end periodic damage, in slot order then status insertion order.
    ///
    /// Damage is `damage_per_round * stacks`. Tick defeats carry no attacker.
    pub(super) fn tick_statuses(&mut self) -> Result<(), EngineError> {
        let slots: Vec<Slot> = self.state.participants().iter().map(|p| p.slot).collect();

        for slot in slots {
            let ticking: Vec<_> = self
                .state
                .require(slot)?
                .vitals
                .statuses()
                .iter()
                .map(|active| {
                    let per_round = status_definition(active.id).damage_per_round;
                    (active.id, per_round * active.stacks as u32)
                })
                .filter(|(_, damage)| *damage > 0)
                .collect();

            for (status, damage) in ticking {
                if !self.state.is_alive(slot) {
                    break;
                }
                self.state.require_mut(slot)?.vitals.take_damage(damage);
                let hp_after = self.state.require(slot)?.hp();
                self.state.record(EventKind::StatusTick {
                    target: slot,
                    status,
                    damage,
                    hp_after,
                });
                if hp_after == 0 {
                    self.defeat(slot, None, Origin::Tick)?;
                }
            }
        }
        Ok(())
    }

    /// Round-end decay of every participant's effects and cooldowns.
    pub(super) fn tick_effects(&mut self) {
        self.state.record(EventKind::EffectsTicked);

        let mut expired = Vec::new();
        for participant in self.state.participants_mut() {
            let slot = participant.slot;
            expired.extend(participant.vitals.tick().into_iter().map(|effect| (slot, effect)));
        }
        for (target, effect) in expired {
            self.state.record(EventKind::EffectExpired { target, effect });
        }
    }

    fn credit_damage(&mut self, source: Slot, amount: u32) -> Result<(), EngineError> {
        let position = self.position(source)?;
        let round = self.state.round();
        self.state.tally.add_damage(round, position, amount);
        Ok(())
    }

    fn position(&self, slot: Slot) -> Result<usize, EngineError> {
        self.state.position(slot).ok_or_else(|| {
            EngineError::internal(
                self.state.match_id().as_str(),
                self.state.round(),
                format!("no participant in slot {slot}"),
            )
        })
    }
}
