use std::sync::Arc;

use super::{ParticipantSnapshot, Slot, Vitals};
use crate::model::{Character, Stat};

/// A character placed in a match: shared template plus its own vitals.
#[derive(Clone, Debug)]
pub struct Participant {
    pub slot: Slot,
    pub character: Arc<Character>,
    pub vitals: Vitals,
}

impl Participant {
    pub fn new(slot: Slot, character: Arc<Character>) -> Self {
        let vitals = Vitals::new(character.stats.hp, character.skills.len());
        Self {
            slot,
            character,
            vitals,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.vitals.is_alive()
    }

    pub fn hp(&self) -> u32 {
        self.vitals.hp()
    }

    pub fn effective_stat(&self, stat: Stat) -> u32 {
        self.vitals.effective_stat(&self.character.stats, stat)
    }

    pub fn snapshot(&self) -> ParticipantSnapshot {
        self.vitals.snapshot(self.slot, self.character.id)
    }
}
