use std::collections::BTreeMap;

use super::MatchId;
use crate::balance::{BuffId, DebuffId, StatusId};
use crate::event::EventLog;
use crate::model::CharacterId;
use crate::state::{ParticipantSnapshot, Slot, StateDigest};

/// Winner of a match.
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
pub enum Outcome {
    SideA,
    SideB,
    Draw,
}

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
pub enum EndReason {
    /// One side has no living participants.
    Elimination,
    /// Both sides were wiped in the same round.
    MutualElimination,
    /// `max_rounds` elapsed with both sides standing.
    RoundLimit,
}

/// Per-participant totals.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantTotals {
    pub slot: Slot,
    pub character: CharacterId,
    pub damage_dealt: u64,
    pub healing_done: u64,
}

/// What happened within one round. Round 0 covers battle-start passives and
/// only appears when they dealt damage or healed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundSummary {
    pub round: u32,
    /// Participants that dealt damage or healed this round, in slot order.
    pub participants: Vec<ParticipantTotals>,
    /// Participants defeated this round, in defeat order.
    pub defeated: Vec<Slot>,
}

impl RoundSummary {
    pub fn damage_dealt(&self) -> u64 {
        self.participants.iter().map(|t| t.damage_dealt).sum()
    }

    pub fn healing_done(&self) -> u64 {
        self.participants.iter().map(|t| t.healing_done).sum()
    }
}

/// Aggregated statistics of a finished match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSummary {
    /// In slot order.
    pub participants: Vec<ParticipantTotals>,
    pub critical_hits: u32,
    pub misses: u32,
    /// Applications that changed state (ignored applications are not counted).
    pub buffs_applied: BTreeMap<BuffId, u32>,
    pub debuffs_applied: BTreeMap<DebuffId, u32>,
    pub statuses_applied: BTreeMap<StatusId, u32>,
    /// Most damage dealt; ties go to the earlier slot. `None` if nobody dealt damage.
    pub mvp: Option<Slot>,
    pub round_summaries: Vec<RoundSummary>,
}

impl BattleSummary {
    pub fn totals(&self, slot: Slot) -> Option<&ParticipantTotals> {
        self.participants.iter().find(|t| t.slot == slot)
    }
}

#[derive(Clone, Debug, Default)]
struct RoundTally {
    round: u32,
    damage: Vec<u64>,
    healing: Vec<u64>,
    defeated: Vec<usize>,
}

/// Running counters kept while a match is simulated, indexed by position.
#[derive(Clone, Debug, Default)]
pub(crate) struct SummaryTally {
    pub damage: Vec<u64>,
    pub healing: Vec<u64>,
    rounds: Vec<RoundTally>,
    pub critical_hits: u32,
    pub misses: u32,
    pub buffs: BTreeMap<BuffId, u32>,
    pub debuffs: BTreeMap<DebuffId, u32>,
    pub statuses: BTreeMap<StatusId, u32>,
}

impl SummaryTally {
    pub fn new(participants: usize) -> Self {
        Self {
            damage: vec![0; participants],
            healing: vec![0; participants],
            ..Self::default()
        }
    }

    /// Opens the entry for `round` so quiet rounds still get a summary.
    pub fn begin_round(&mut self, round: u32) {
        self.round_mut(round);
    }

    pub fn add_damage(&mut self, round: u32, position: usize, amount: u32) {
        if let Some(total) = self.damage.get_mut(position) {
            *total = total.saturating_add(amount as u64);
        }
        if let Some(total) = self.round_mut(round).damage.get_mut(position) {
            *total = total.saturating_add(amount as u64);
        }
    }

    pub fn add_healing(&mut self, round: u32, position: usize, amount: u32) {
        if let Some(total) = self.healing.get_mut(position) {
            *total = total.saturating_add(amount as u64);
        }
        if let Some(total) = self.round_mut(round).healing.get_mut(position) {
            *total = total.saturating_add(amount as u64);
        }
    }

    pub fn add_defeat(&mut self, round: u32, position: usize) {
        self.round_mut(round).defeated.push(position);
    }

    fn round_mut(&mut self, round: u32) -> &mut RoundTally {
        if self.rounds.last().is_none_or(|last| last.round != round) {
            self.rounds.push(RoundTally {
                round,
                damage: vec![0; self.damage.len()],
                healing: vec![0; self.healing.len()],
                defeated: Vec::new(),
            });
        }
        let last = self.rounds.len() - 1;
        &mut self.rounds[last]
    }

    pub fn finish(self, roster: &[(Slot, CharacterId)]) -> BattleSummary {
        let participants: Vec<ParticipantTotals> = roster
            .iter()
            .enumerate()
            .map(|(position, &(slot, character))| ParticipantTotals {
                slot,
                character,
                damage_dealt: self.damage.get(position).copied().unwrap_or(0),
                healing_done: self.healing.get(position).copied().unwrap_or(0),
            })
            .collect();

        // Strictly greater keeps the earliest slot on ties.
        let mut mvp: Option<&ParticipantTotals> = None;
        for totals in participants.iter().filter(|t| t.damage_dealt > 0) {
            if mvp.is_none_or(|best| totals.damage_dealt > best.damage_dealt) {
                mvp = Some(totals);
            }
        }
        let mvp = mvp.map(|t| t.slot);

        let round_summaries = self
            .rounds
            .iter()
            .map(|tally| RoundSummary {
                round: tally.round,
                participants: roster
                    .iter()
                    .enumerate()
                    .filter_map(|(position, &(slot, character))| {
                        let damage_dealt = tally.damage.get(position).copied().unwrap_or(0);
                        let healing_done = tally.healing.get(position).copied().unwrap_or(0);
                        (damage_dealt > 0 || healing_done > 0).then_some(ParticipantTotals {
                            slot,
                            character,
                            damage_dealt,
                            healing_done,
                        })
                    })
                    .collect(),
                defeated: tally
                    .defeated
                    .iter()
                    .filter_map(|&position| roster.get(position).map(|&(slot, _)| slot))
                    .collect(),
            })
            .collect();

        BattleSummary {
            participants,
            critical_hits: self.critical_hits,
            misses: self.misses,
            buffs_applied: self.buffs,
            debuffs_applied: self.debuffs,
            statuses_applied: self.statuses,
            mvp,
            round_summaries,
        }
    }
}

/// Immutable record of a completed simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleResult {
    pub match_id: MatchId,
    pub seed: u64,
    pub outcome: Outcome,
    pub reason: EndReason,
    /// Rounds started, including a round cut short by elimination.
    pub rounds: u32,
    pub log: EventLog,
    pub summary: BattleSummary,
    pub final_state: Vec<ParticipantSnapshot>,
    pub final_digest: StateDigest,
}

impl BattleResult {
    pub fn winner(&self) -> Outcome {
        self.outcome
    }

    pub fn is_draw(&self) -> bool {
        self.outcome == Outcome::Draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Side;

    fn roster() -> Vec<(Slot, CharacterId)> {
        vec![
            (Slot::new(Side::A, 0), CharacterId(1)),
            (Slot::new(Side::B, 0), CharacterId(2)),
            (Slot::new(Side::B, 1), CharacterId(3)),
        ]
    }

    #[test]
    fn mvp_ties_go_to_earlier_slot() {
        let mut tally = SummaryTally::new(3);
        tally.add_damage(1, 1, 40);
        tally.add_damage(1, 2, 40);
        let summary = tally.finish(&roster());
        assert_eq!(summary.mvp, Some(Slot::new(Side::B, 0)));
        assert_eq!(
            summary.totals(Slot::new(Side::B, 1)).map(|t| t.damage_dealt),
            Some(40)
        );
    }

    #[test]
    fn no_damage_means_no_mvp() {
        let mut tally = SummaryTally::new(3);
        tally.add_healing(1, 0, 10);
        assert_eq!(tally.finish(&roster()).mvp, None);
    }

    #[test]
    fn rounds_are_summarised_separately() {
        let mut tally = SummaryTally::new(3);
        tally.add_healing(0, 0, 5);
        tally.begin_round(1);
        tally.add_damage(1, 0, 30);
        tally.add_damage(1, 0, 20);
        tally.add_healing(1, 2, 7);
        tally.begin_round(2);
        tally.begin_round(3);
        tally.add_damage(3, 1, 90);
        tally.add_defeat(3, 0);

        let summary = tally.finish(&roster());
        let rounds: Vec<u32> = summary.round_summaries.iter().map(|r| r.round).collect();
        assert_eq!(rounds, vec![0, 1, 2, 3]);

        let first = &summary.round_summaries[1];
        assert_eq!(first.damage_dealt(), 50);
        assert_eq!(first.healing_done(), 7);
        assert_eq!(first.participants.len(), 2);
        assert!(first.defeated.is_empty());

        assert!(summary.round_summaries[2].participants.is_empty());

        let last = &summary.round_summaries[3];
        assert_eq!(last.participants[0].slot, Slot::new(Side::B, 0));
        assert_eq!(last.defeated, vec![Slot::new(Side::A, 0)]);
        assert_eq!(summary.totals(Slot::new(Side::A, 0)).map(|t| t.damage_dealt), Some(50));
    }
}
