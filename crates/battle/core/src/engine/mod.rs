//! Round-by-round battle simulation.
//!
//! The [`BattleEngine`] is the only code that mutates a [`BattleState`]. A
//! simulation is a pure function of `(match, seed)`: it performs no I/O,
//! draws every random value from the match's [`BattleRng`] in a fixed order,
//! and records each transition in the event log.
//!
//! # Round Structure
//!
//! ```text
//! round 0:  MatchStarted, on-battle-start passives
//! round n:  RoundStarted, TurnOrder
//!           per actor: TurnSkipped | TurnStarted, on-turn-start passives, skill
//!           status ticks, EffectsTicked + EffectExpired*
//!           RoundEnded
//! end:      MatchEnded
//! ```

mod actions;
mod battle;
mod passives;
mod power;
mod replay;
mod result;
mod rng;
mod state;
mod targeting;
mod turns;

pub use battle::{BattleMatch, MatchId, create_match};
pub use power::calculate_power;
pub use replay::{ReplayOutput, replay};
pub use result::{
    BattleResult, BattleSummary, EndReason, Outcome, ParticipantTotals, RoundSummary,
};
pub use rng::{BattleRng, mix_seed};
pub use state::BattleState;
pub use targeting::{select_skill, select_targets};

use crate::config::{BattleConfig, RoundLimitPolicy};
use crate::error::EngineError;
use crate::event::{EventKind, RosterEntry};
use crate::model::{PassiveTrigger, Skill};
use crate::state::{Side, StateDigest};

/// Runs a match to completion.
///
/// The same match always produces the same result, event for event.
pub fn simulate(battle: &BattleMatch) -> Result<BattleResult, EngineError> {
    let mut state = BattleState::new(battle);
    let basic_attack = Skill::basic_attack();

    let (outcome, reason) = BattleEngine::new(&mut state, battle.config(), &basic_attack).run()?;

    let final_state = state.snapshot();
    let roster: Vec<_> = final_state.iter().map(|s| (s.slot, s.character)).collect();
    let final_digest = StateDigest::compute(&final_state);
    let rounds = state.round();
    let (log, tally) = state.into_parts();

    Ok(BattleResult {
        match_id: battle.id().clone(),
        seed: battle.seed(),
        outcome,
        reason,
        rounds,
        log,
        summary: tally.finish(&roster),
        final_state,
        final_digest,
    })
}

/// Mutating view over one simulation's state.
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
    config: &'a BattleConfig,
    basic_attack: &'a Skill,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut BattleState, config: &'a BattleConfig, basic_attack: &'a Skill) -> Self {
        Self {
            state,
            config,
            basic_attack,
        }
    }

    /// Plays every round and records the terminal event.
    pub fn run(&mut self) -> Result<(Outcome, EndReason), EngineError> {
        self.start()?;

        let mut decision = self.decision();
        let mut round = 0;
        while decision.is_none() && round < self.config.max_rounds {
            round += 1;
            self.play_round(round)?;
            decision = self.decision();
        }

        let (outcome, reason) = decision.unwrap_or_else(|| self.round_limit_decision());
        self.state.record(EventKind::MatchEnded { outcome, reason });
        Ok((outcome, reason))
    }

    fn start(&mut self) -> Result<(), EngineError> {
        let roster = self
            .state
            .participants()
            .iter()
            .map(|p| RosterEntry {
                slot: p.slot,
                character: p.character.id,
                name: p.character.name.clone(),
                max_hp: p.vitals.max_hp(),
                skills: p.vitals.skill_count() as u8,
            })
            .collect();

        self.state.record(EventKind::MatchStarted {
            match_id: self.state.match_id().clone(),
            seed: self.state.seed(),
            round_limit_policy: self.config.round_limit_policy,
            roster,
        });

        let slots: Vec<_> = self.state.participants().iter().map(|p| p.slot).collect();
        for slot in slots {
            self.trigger_passives(slot, PassiveTrigger::OnBattleStart, None)?;
        }
        Ok(())
    }

    fn play_round(&mut self, round: u32) -> Result<(), EngineError> {
        self.state.begin_round(round);
        self.state.record(EventKind::RoundStarted);

        let order = self.roll_turn_order();
        self.state.record(EventKind::TurnOrder {
            order: order.clone(),
        });

        for actor in order {
            if self.decision().is_some() {
                break;
            }
            self.take_turn(actor)?;
        }

        if self.decision().is_none() {
            self.tick_statuses()?;
        }
        if self.decision().is_none() {
            self.tick_effects();
        }

        self.state.record(EventKind::RoundEnded);
        Ok(())
    }

    /// Elimination outcome, if either side is wiped.
    fn decision(&self) -> Option<(Outcome, EndReason)> {
        match (self.state.side_alive(Side::A), self.state.side_alive(Side::B)) {
            (true, true) => None,
            (true, false) => Some((Outcome::SideA, EndReason::Elimination)),
            (false, true) => Some((Outcome::SideB, EndReason::Elimination)),
            (false, false) => Some((Outcome::Draw, EndReason::MutualElimination)),
        }
    }

    fn round_limit_decision(&self) -> (Outcome, EndReason) {
        let outcome = match self.config.round_limit_policy {
            RoundLimitPolicy::Draw => Outcome::Draw,
            RoundLimitPolicy::HigherRemainingHp => {
                let a = self.state.remaining_hp(Side::A);
                let b = self.state.remaining_hp(Side::B);
                match a.cmp(&b) {
                    core::cmp::Ordering::Greater => Outcome::SideA,
                    core::cmp::Ordering::Less => Outcome::SideB,
                    core::cmp::Ordering::Equal => Outcome::Draw,
                }
            }
        };
        (outcome, EndReason::RoundLimit)
    }
}
