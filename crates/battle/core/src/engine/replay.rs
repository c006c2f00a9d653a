//! Log-driven reconstruction of a finished match.
//!
//! Replay never re-runs the combat rules. It rebuilds participants from the
//! roster header and applies each recorded transition, checking that every
//! event is legal in the state the previous events produced. A log that came
//! out of [`super::simulate`] always replays to the same final digest.

use std::collections::VecDeque;

use super::{EndReason, MatchId, Outcome};
use crate::balance::status_definition;
use crate::config::RoundLimitPolicy;
use crate::error::ReplayError;
use crate::event::{Event, EventKind, RosterEntry, SkillRef};
use crate::model::CharacterId;
use crate::state::{Application, EffectRef, ParticipantSnapshot, Side, Slot, StateDigest, Vitals};

/// What a successful replay reconstructed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplayOutput {
    pub match_id: MatchId,
    pub seed: u64,
    pub events_applied: usize,
    pub rounds: u32,
    pub outcome: Outcome,
    pub reason: EndReason,
    pub final_state: Vec<ParticipantSnapshot>,
    pub final_digest: StateDigest,
}

/// Rebuilds the final state of a match from its event log.
///
/// `seed` must match the seed recorded in the header.
pub fn replay(log: &[Event], seed: u64) -> Result<ReplayOutput, ReplayError> {
    let header = log.first().ok_or(ReplayError::EmptyLog)?;
    let EventKind::MatchStarted {
        match_id,
        seed: recorded,
        round_limit_policy,
        roster,
    } = &header.kind
    else {
        return Err(ReplayError::MissingHeader);
    };
    if *recorded != seed {
        return Err(ReplayError::SeedMismatch {
            provided: seed,
            recorded: *recorded,
        });
    }

    let mut replayer = Replayer::from_roster(roster, *round_limit_policy)?;
    for (index, event) in log.iter().enumerate() {
        replayer.apply(index, event)?;
    }

    let (outcome, reason) = replayer
        .ending
        .ok_or_else(|| ReplayError::mismatch(log.len(), "log ends without a match end"))?;

    let final_state = replayer.snapshot();
    Ok(ReplayOutput {
        match_id: match_id.clone(),
        seed,
        events_applied: log.len(),
        rounds: replayer.round,
        outcome,
        reason,
        final_digest: StateDigest::compute(&final_state),
        final_state,
    })
}

struct Entry {
    slot: Slot,
    character: CharacterId,
    vitals: Vitals,
    defeated: bool,
}

struct Replayer {
    entries: Vec<Entry>,
    round_limit_policy: RoundLimitPolicy,
    round: u32,
    pending_expiry: VecDeque<(Slot, EffectRef)>,
    ending: Option<(Outcome, EndReason)>,
}

impl Replayer {
    fn from_roster(
        roster: &[RosterEntry],
        round_limit_policy: RoundLimitPolicy,
    ) -> Result<Self, ReplayError> {
        let mut entries = Vec::with_capacity(roster.len());
        let mut expected = (Side::A, 0u8);

        for entry in roster {
            // Canonical slot order: A1..An then B1..Bm.
            let in_order = match (expected, entry.slot.side) {
                ((side, index), s) if side == s => entry.slot.index == index,
                ((Side::A, _), Side::B) => entry.slot.index == 0,
                _ => false,
            };
            if !in_order || entry.max_hp == 0 {
                return Err(ReplayError::mismatch(0, format!("malformed roster entry {}", entry.slot)));
            }
            expected = (entry.slot.side, entry.slot.index + 1);
            entries.push(Entry {
                slot: entry.slot,
                character: entry.character,
                vitals: Vitals::new(entry.max_hp, entry.skills as usize),
                defeated: false,
            });
        }

        let sides = |side| entries.iter().any(|e: &Entry| e.slot.side == side);
        if !sides(Side::A) || !sides(Side::B) {
            return Err(ReplayError::mismatch(0, "roster must contain both sides"));
        }

        Ok(Self {
            entries,
            round_limit_policy,
            round: 0,
            pending_expiry: VecDeque::new(),
            ending: None,
        })
    }

    fn apply(&mut self, index: usize, event: &Event) -> Result<(), ReplayError> {
        let fail = |reason: String| ReplayError::mismatch(index, reason);

        if event.sequence as usize != index {
            return Err(fail(format!("sequence {} out of place", event.sequence)));
        }
        if self.ending.is_some() {
            return Err(fail("event after match end".into()));
        }
        if !matches!(event.kind, EventKind::RoundStarted) && event.round != self.round {
            return Err(fail(format!(
                "event tagged round {} during round {}",
                event.round, self.round
            )));
        }
        if !self.pending_expiry.is_empty() && !matches!(event.kind, EventKind::EffectExpired { .. }) {
            return Err(fail("effect expiry missing after tick".into()));
        }

        match &event.kind {
            EventKind::MatchStarted { .. } => {
                if index != 0 {
                    return Err(fail("duplicate match header".into()));
                }
            }
            EventKind::RoundStarted => {
                if event.round != self.round + 1 {
                    return Err(fail(format!("round {} does not follow {}", event.round, self.round)));
                }
                self.round = event.round;
            }
            EventKind::TurnOrder { order } => {
                let mut living: Vec<Slot> = self.living().collect();
                let mut ordered = order.clone();
                living.sort();
                ordered.sort();
                if living != ordered {
                    return Err(fail("turn order does not match living participants".into()));
                }
            }
            EventKind::TurnStarted { actor } => {
                let vitals = self.alive(*actor, index)?;
                if let Some(status) = vitals.action_blocker() {
                    return Err(fail(format!("{actor} acted while under {status}")));
                }
            }
            EventKind::TurnSkipped { actor, status } => {
                let vitals = self.alive(*actor, index)?;
                if !vitals.statuses().contains(*status) || !status_definition(*status).prevents_action {
                    return Err(fail(format!("{actor} skipped without {status}")));
                }
            }
            EventKind::SkillUsed {
                actor,
                skill,
                targets,
                cooldown,
            } => {
                for target in targets {
                    self.alive(*target, index)?;
                }
                let vitals = self.alive_mut(*actor, index)?;
                match skill {
                    SkillRef::Declared(slot) => {
                        if vitals.cooldown(*slot as usize) != Some(0) {
                            return Err(fail(format!("{actor} used skill {slot} while not ready")));
                        }
                        vitals.set_cooldown(*slot as usize, *cooldown);
                    }
                    SkillRef::Basic => {
                        if *cooldown != 0 {
                            return Err(fail("basic attack recorded a cooldown".into()));
                        }
                    }
                }
            }
            EventKind::Missed { actor, target } => {
                self.alive(*actor, index)?;
                self.alive(*target, index)?;
            }
            EventKind::Hit {
                target,
                damage,
                hp_after,
                ..
            }
            | EventKind::EffectDamage {
                target,
                damage,
                hp_after,
                ..
            } => {
                let vitals = self.alive_mut(*target, index)?;
                vitals.take_damage(*damage);
                Self::check_hp(vitals, *hp_after, index)?;
            }
            EventKind::Healed {
                target,
                amount,
                hp_after,
                ..
            } => {
                let vitals = self.alive_mut(*target, index)?;
                if vitals.heal(*amount) != *amount {
                    return Err(fail(format!("{target} healed past max hp")));
                }
                Self::check_hp(vitals, *hp_after, index)?;
            }
            EventKind::BuffApplied {
                target,
                buff,
                application,
                ..
            } => {
                let applied = self.alive_mut(*target, index)?.apply_buff(*buff);
                Self::check_application(applied, *application, index)?;
            }
            EventKind::DebuffApplied {
                target,
                debuff,
                application,
                ..
            } => {
                let applied = self.alive_mut(*target, index)?.apply_debuff(*debuff);
                Self::check_application(applied, *application, index)?;
            }
            EventKind::StatusApplied {
                target,
                status,
                application,
                ..
            } => {
                let applied = self.alive_mut(*target, index)?.apply_status(*status);
                Self::check_application(applied, *application, index)?;
            }
            EventKind::PassiveTriggered { owner, .. } => {
                self.entry(*owner, index)?;
            }
            EventKind::StatusTick {
                target,
                status,
                damage,
                hp_after,
            } => {
                let vitals = self.alive_mut(*target, index)?;
                let stacks = vitals
                    .statuses()
                    .get(*status)
                    .map(|active| active.stacks)
                    .ok_or_else(|| fail(format!("{target} ticked {status} without having it")))?;
                if *damage != status_definition(*status).damage_per_round * stacks as u32 {
                    return Err(fail(format!("{status} tick damage {damage} is wrong")));
                }
                vitals.take_damage(*damage);
                Self::check_hp(vitals, *hp_after, index)?;
            }
            EventKind::Defeated { target, .. } => {
                let entry = self.entry_mut(*target, index)?;
                if entry.defeated || entry.vitals.is_alive() {
                    return Err(fail(format!("{target} defeated with {} hp", entry.vitals.hp())));
                }
                entry.defeated = true;
                entry.vitals.clear_effects();
            }
            EventKind::EffectsTicked => {
                for entry in &mut self.entries {
                    let slot = entry.slot;
                    self.pending_expiry
                        .extend(entry.vitals.tick().into_iter().map(|effect| (slot, effect)));
                }
            }
            EventKind::EffectExpired { target, effect } => match self.pending_expiry.pop_front() {
                Some(expected) if expected == (*target, *effect) => {}
                _ => return Err(fail(format!("unexpected expiry of {effect} on {target}"))),
            },
            EventKind::RoundEnded => {}
            EventKind::MatchEnded { outcome, reason } => {
                let a = self.side_alive(Side::A);
                let b = self.side_alive(Side::B);
                let consistent = match reason {
                    EndReason::Elimination => {
                        (a && !b && *outcome == Outcome::SideA)
                            || (!a && b && *outcome == Outcome::SideB)
                    }
                    EndReason::MutualElimination => !a && !b && *outcome == Outcome::Draw,
                    EndReason::RoundLimit => a && b && *outcome == self.round_limit_verdict(),
                };
                if !consistent {
                    return Err(fail(format!("{outcome} by {reason} contradicts final state")));
                }
                self.ending = Some((*outcome, *reason));
            }
        }
        Ok(())
    }

    fn entry(&self, slot: Slot, index: usize) -> Result<&Entry, ReplayError> {
        self.entries
            .iter()
            .find(|e| e.slot == slot)
            .ok_or_else(|| ReplayError::mismatch(index, format!("unknown slot {slot}")))
    }

    fn entry_mut(&mut self, slot: Slot, index: usize) -> Result<&mut Entry, ReplayError> {
        self.entries
            .iter_mut()
            .find(|e| e.slot == slot)
            .ok_or_else(|| ReplayError::mismatch(index, format!("unknown slot {slot}")))
    }

    fn alive(&self, slot: Slot, index: usize) -> Result<&Vitals, ReplayError> {
        let entry = self.entry(slot, index)?;
        if !entry.vitals.is_alive() {
            return Err(ReplayError::mismatch(index, format!("{slot} is not alive")));
        }
        Ok(&entry.vitals)
    }

    fn alive_mut(&mut self, slot: Slot, index: usize) -> Result<&mut Vitals, ReplayError> {
        let entry = self.entry_mut(slot, index)?;
        if !entry.vitals.is_alive() {
            return Err(ReplayError::mismatch(index, format!("{slot} is not alive")));
        }
        Ok(&mut entry.vitals)
    }

    fn living(&self) -> impl Iterator<Item = Slot> + '_ {
        self.entries
            .iter()
            .filter(|e| e.vitals.is_alive())
            .map(|e| e.slot)
    }

    fn side_alive(&self, side: Side) -> bool {
        self.living().any(|slot| slot.side == side)
    }

    fn remaining_hp(&self, side: Side) -> u64 {
        self.entries
            .iter()
            .filter(|e| e.slot.side == side)
            .map(|e| e.vitals.hp() as u64)
            .sum()
    }

    /// Outcome the recorded policy dictates for a match cut off by the round limit.
    fn round_limit_verdict(&self) -> Outcome {
        match self.round_limit_policy {
            RoundLimitPolicy::Draw => Outcome::Draw,
            RoundLimitPolicy::HigherRemainingHp => {
                match self.remaining_hp(Side::A).cmp(&self.remaining_hp(Side::B)) {
                    core::cmp::Ordering::Greater => Outcome::SideA,
                    core::cmp::Ordering::Less => Outcome::SideB,
                    core::cmp::Ordering::Equal => Outcome::Draw,
                }
            }
        }
    }

    fn check_hp(vitals: &Vitals, expected: u32, index: usize) -> Result<(), ReplayError> {
        if vitals.hp() != expected {
            return Err(ReplayError::mismatch(
                index,
                format!("hp {} where log records {expected}", vitals.hp()),
            ));
        }
        Ok(())
    }

    fn check_application(
        applied: Application,
        recorded: Application,
        index: usize,
    ) -> Result<(), ReplayError> {
        if applied != recorded {
            return Err(ReplayError::mismatch(
                index,
                format!("stacking produced {applied:?}, log records {recorded:?}"),
            ));
        }
        Ok(())
    }

    fn snapshot(&self) -> Vec<ParticipantSnapshot> {
        self.entries
            .iter()
            .map(|e| e.vitals.snapshot(e.slot, e.character))
            .collect()
    }
}
