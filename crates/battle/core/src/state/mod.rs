//! Per-match mutable state.
//!
//! Templates in [`crate::model`] are shared and read-only; everything a match
//! changes (HP, active effects, cooldowns) lives in [`Vitals`], owned by the
//! participant for the duration of one simulation.
mod effects;
mod participant;
mod snapshot;
mod vitals;

pub use effects::{ActiveEffect, Application, EffectRef, EffectStack, StackOutcome};
pub use participant::Participant;
pub use snapshot::{ParticipantSnapshot, StateDigest};
pub use vitals::Vitals;

/// One of the two opposing parties.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Position of a participant: its side and index within that party.
///
/// Slot order (all of side A, then all of side B) is the canonical ordering
/// used for tie-breaks and for every deterministic iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub side: Side,
    pub index: u8,
}

impl Slot {
    pub const fn new(side: Side, index: u8) -> Self {
        Self { side, index }
    }

    pub const fn is_ally_of(self, other: Slot) -> bool {
        matches!(
            (self.side, other.side),
            (Side::A, Side::A) | (Side::B, Side::B)
        )
    }
}

impl core::fmt::Display for Slot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}", self.side, self.index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_order_puts_side_a_first() {
        let mut slots = vec![Slot::new(Side::B, 0), Slot::new(Side::A, 1), Slot::new(Side::A, 0)];
        slots.sort();
        assert_eq!(
            slots,
            vec![Slot::new(Side::A, 0), Slot::new(Side::A, 1), Slot::new(Side::B, 0)]
        );
        assert_eq!(Slot::new(Side::B, 2).to_string(), "B3");
        assert!(Slot::new(Side::A, 0).is_ally_of(Slot::new(Side::A, 3)));
        assert_eq!(Side::A.opponent(), Side::B);
    }
}
