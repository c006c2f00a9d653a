//! Integer combat formulas shared by the damage pipeline.

use crate::model::Chance;

pub const DEFAULT_MIN_DAMAGE: u32 = 1;
pub const DEFAULT_CRIT_CHANCE: Chance = Chance::from_bps(1_000);
pub const DEFAULT_CRIT_MULTIPLIER: u32 = 150;
pub const DEFAULT_ARMOR_CONSTANT: u32 = 100;
pub const DEFAULT_EVASION_PER_SPEED: u16 = 10;

/// Evasion never exceeds this, however fast the defender is.
pub const MAX_EVASION: Chance = Chance::from_bps(5_000);

/// Critical chance after modifiers, capped at certainty.
pub fn crit_chance(base: Chance, modifiers: impl IntoIterator<Item = Chance>) -> Chance {
    modifiers
        .into_iter()
        .fold(base, |chance, bonus| chance.saturating_add(bonus))
}

/// Share of incoming damage absorbed by `defense`, in basis points.
///
/// ```text
/// reduction = defense * 10000 / (defense + armor_constant)
/// ```
///
/// Diminishing returns: the reduction approaches but never reaches 10000.
pub fn armor_reduction(defense: u32, armor_constant: u32) -> u32 {
    let total = defense as u64 + armor_constant as u64;
    if total == 0 {
        return 0;
    }
    (defense as u64 * 10_000 / total) as u32
}

/// Dodge chance granted by effective speed.
pub fn evasion(speed: u32, per_speed: u16) -> Chance {
    let bps = (speed as u64 * per_speed as u64).min(MAX_EVASION.bps() as u64);
    Chance::from_bps(bps as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armor_has_diminishing_returns() {
        assert_eq!(armor_reduction(0, 100), 0);
        assert_eq!(armor_reduction(100, 100), 5_000);
        assert_eq!(armor_reduction(300, 100), 7_500);
        assert!(armor_reduction(u32::MAX, 100) < 10_000);
        assert_eq!(armor_reduction(0, 0), 0);
    }

    #[test]
    fn crit_chance_sums_and_caps() {
        let base = Chance::from_bps(1_000);
        assert_eq!(crit_chance(base, []), base);
        assert_eq!(
            crit_chance(base, [Chance::from_bps(1_500), Chance::from_bps(500)]).bps(),
            3_000
        );
        assert_eq!(
            crit_chance(base, [Chance::CERTAIN, Chance::CERTAIN]),
            Chance::CERTAIN
        );
    }

    #[test]
    fn evasion_is_capped() {
        assert_eq!(evasion(0, 10).bps(), 0);
        assert_eq!(evasion(30, 10).bps(), 300);
        assert_eq!(evasion(10_000, 10), MAX_EVASION);
    }
}
