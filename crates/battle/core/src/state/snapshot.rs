//! Final-state snapshots and their digest.

use sha2::{Digest, Sha256};

use super::{ActiveEffect, Side, Slot};
use crate::balance::{BuffId, DebuffId, StatusId};
use crate::model::CharacterId;

/// Observable state of one participant, as reported in results and replays.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantSnapshot {
    pub slot: Slot,
    pub character: CharacterId,
    pub hp: u32,
    pub max_hp: u32,
    pub alive: bool,
    pub buffs: Vec<ActiveEffect<BuffId>>,
    pub debuffs: Vec<ActiveEffect<DebuffId>>,
    pub statuses: Vec<ActiveEffect<StatusId>>,
    pub cooldowns: Vec<u8>,
}

/// SHA-256 over the canonical byte encoding of all participant snapshots in
/// slot order. Two runs end in the same state iff their digests match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDigest([u8; 32]);

impl StateDigest {
    pub fn compute(snapshots: &[ParticipantSnapshot]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((snapshots.len() as u32).to_le_bytes());

        for snapshot in snapshots {
            let side = match snapshot.slot.side {
                Side::A => 0u8,
                Side::B => 1u8,
            };
            hasher.update([side, snapshot.slot.index]);
            hasher.update(snapshot.character.0.to_le_bytes());
            hasher.update(snapshot.hp.to_le_bytes());
            hasher.update(snapshot.max_hp.to_le_bytes());
            hasher.update([snapshot.alive as u8]);

            hash_effects(&mut hasher, &snapshot.buffs, |id: BuffId| id as u8);
            hash_effects(&mut hasher, &snapshot.debuffs, |id: DebuffId| id as u8);
            hash_effects(&mut hasher, &snapshot.statuses, |id: StatusId| id as u8);

            hasher.update([snapshot.cooldowns.len() as u8]);
            hasher.update(&snapshot.cooldowns);
        }

        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl core::fmt::Display for StateDigest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn hash_effects<K: Copy>(hasher: &mut Sha256, effects: &[ActiveEffect<K>], tag: impl Fn(K) -> u8) {
    hasher.update([effects.len() as u8]);
    for effect in effects {
        hasher.update([tag(effect.id), effect.remaining, effect.stacks]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Vitals;

    #[test]
    fn digest_tracks_state_changes() {
        let slot = Slot::new(Side::A, 0);
        let mut vitals = Vitals::new(100, 1);
        let before = StateDigest::compute(&[vitals.snapshot(slot, CharacterId(7))]);
        let same = StateDigest::compute(&[vitals.snapshot(slot, CharacterId(7))]);
        assert_eq!(before, same);

        vitals.take_damage(1);
        let after = StateDigest::compute(&[vitals.snapshot(slot, CharacterId(7))]);
        assert_ne!(before, after);
        assert_eq!(after.to_hex().len(), 64);
    }
}
