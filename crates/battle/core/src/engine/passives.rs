use super::BattleEngine;
use super::actions::Origin;
use crate::error::EngineError;
use crate::event::EventKind;
use crate::model::PassiveTrigger;
use crate::state::Slot;

impl<'a> BattleEngine<'a> {
    /// Fires every passive of `owner` matching `trigger`, in declaration order.
    ///
    /// `other` is the counterpart of the triggering event (the defender for
    /// on-hit, the attacker for on-damage-taken). Without one, target-side
    /// effects land on the owner. On-death passives fire for a defeated owner;
    /// every other trigger requires the owner to be alive.
    pub(super) fn trigger_passives(
        &mut self,
        owner: Slot,
        trigger: PassiveTrigger,
        other: Option<Slot>,
    ) -> Result<(), EngineError> {
        let participant = self.state.require(owner)?;
        if trigger != PassiveTrigger::OnDeath && !participant.is_alive() {
            return Ok(());
        }

        let character = participant.character.clone();
        let counterpart = other.unwrap_or(owner);

        for (index, passive) in character.passives.iter().enumerate() {
            if passive.trigger != trigger {
                continue;
            }
            self.state.record(EventKind::PassiveTriggered {
                owner,
                passive: index as u8,
                trigger,
            });
            self.apply_effect(owner, &passive.effect, counterpart, Origin::Passive)?;
        }
        Ok(())
    }
}
