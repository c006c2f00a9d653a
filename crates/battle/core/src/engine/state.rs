use super::result::SummaryTally;
use super::{BattleMatch, BattleRng, MatchId};
use crate::error::EngineError;
use crate::event::{EventKind, EventLog};
use crate::state::{Participant, ParticipantSnapshot, Side, Slot};

/// All mutable state of one simulation.
///
/// Created from a [`BattleMatch`] when the simulation starts and owned by it
/// until the result is produced. Participants are stored in slot order.
#[derive(Clone, Debug)]
pub struct BattleState {
    match_id: MatchId,
    seed: u64,
    round: u32,
    participants: Vec<Participant>,
    side_a_len: usize,
    pub(crate) rng: BattleRng,
    pub(crate) log: EventLog,
    pub(crate) tally: SummaryTally,
}

impl BattleState {
    pub fn new(battle: &BattleMatch) -> Self {
        let mut participants = Vec::new();
        for side in [Side::A, Side::B] {
            for (index, character) in battle.party(side).iter().enumerate() {
                let slot = Slot::new(side, index as u8);
                participants.push(Participant::new(slot, character.clone()));
            }
        }

        Self {
            match_id: battle.id().clone(),
            seed: battle.seed(),
            round: 0,
            side_a_len: battle.party(Side::A).len(),
            tally: SummaryTally::new(participants.len()),
            participants,
            rng: BattleRng::from_seed(battle.seed()),
            log: EventLog::new(),
        }
    }

    pub fn match_id(&self) -> &MatchId {
        &self.match_id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub(crate) fn begin_round(&mut self, round: u32) {
        self.round = round;
        self.tally.begin_round(round);
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub(crate) fn participants_mut(&mut self) -> &mut [Participant] {
        &mut self.participants
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Index of `slot` in slot order.
    pub fn position(&self, slot: Slot) -> Option<usize> {
        let position = match slot.side {
            Side::A => slot.index as usize,
            Side::B => self.side_a_len + slot.index as usize,
        };
        let in_party = match slot.side {
            Side::A => (slot.index as usize) < self.side_a_len,
            Side::B => position < self.participants.len(),
        };
        in_party.then_some(position)
    }

    pub fn participant(&self, slot: Slot) -> Option<&Participant> {
        self.position(slot).and_then(|p| self.participants.get(p))
    }

    pub(crate) fn participant_mut(&mut self, slot: Slot) -> Option<&mut Participant> {
        self.position(slot).and_then(|p| self.participants.get_mut(p))
    }

    /// Like [`Self::participant`], but a missing slot is an engine fault.
    pub(crate) fn require(&self, slot: Slot) -> Result<&Participant, EngineError> {
        self.participant(slot).ok_or_else(|| self.missing(slot))
    }

    pub(crate) fn require_mut(&mut self, slot: Slot) -> Result<&mut Participant, EngineError> {
        let err = self.missing(slot);
        self.participant_mut(slot).ok_or(err)
    }

    fn missing(&self, slot: Slot) -> EngineError {
        EngineError::internal(
            self.match_id.as_str(),
            self.round,
            format!("no participant in slot {slot}"),
        )
    }

    pub fn is_alive(&self, slot: Slot) -> bool {
        self.participant(slot).is_some_and(Participant::is_alive)
    }

    /// Living participants of `side`, in slot order.
    pub fn living(&self, side: Side) -> impl Iterator<Item = &Participant> {
        self.participants
            .iter()
            .filter(move |p| p.slot.side == side && p.is_alive())
    }

    pub fn side_alive(&self, side: Side) -> bool {
        self.living(side).next().is_some()
    }

    pub fn remaining_hp(&self, side: Side) -> u64 {
        self.living(side).map(|p| p.hp() as u64).sum()
    }

    pub fn snapshot(&self) -> Vec<ParticipantSnapshot> {
        self.participants.iter().map(Participant::snapshot).collect()
    }

    pub(crate) fn record(&mut self, kind: EventKind) {
        self.log.push(self.round, kind);
    }

    pub(crate) fn into_parts(self) -> (EventLog, SummaryTally) {
        (self.log, self.tally)
    }
}
