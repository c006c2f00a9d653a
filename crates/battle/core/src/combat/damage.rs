//! Damage calculation.

use crate::balance::{elemental_multiplier, formulas};
use crate::model::Element;

/// Inputs to one damage calculation, already resolved to effective values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageInput {
    /// Effective `atk` for physical skills, `elem_atk` for magical ones.
    pub attack: u32,
    /// Effective `def` or `elem_def`, matching `attack`.
    pub defense: u32,
    /// Skill power in percent of `attack`.
    pub power: u32,
    pub attack_element: Element,
    pub defender_element: Element,
    pub critical: bool,
}

/// Calculate damage from a landed hit.
///
/// # Formula
///
/// ```text
/// raw       = attack * power / 100
/// elemental = raw * elemental_multiplier / 100
/// armored   = elemental * (10000 - armor_reduction(defense)) / 10000
/// critical  = armored * crit_multiplier / 100       (on crit only)
/// final     = max(critical, min_damage)
/// ```
///
/// Computed in saturating `u64` and clamped back to `u32`, so extreme stats
/// and powers cap at `u32::MAX` instead of wrapping.
pub fn calculate_damage(
    input: &DamageInput,
    armor_constant: u32,
    crit_multiplier: u32,
    min_damage: u32,
) -> u32 {
    let raw = (input.attack as u64).saturating_mul(input.power as u64) / 100;
    let elemental = raw
        .saturating_mul(elemental_multiplier(input.attack_element, input.defender_element) as u64)
        / 100;

    let reduction = formulas::armor_reduction(input.defense, armor_constant) as u64;
    let mut damage = elemental.saturating_mul(10_000 - reduction) / 10_000;

    if input.critical {
        damage = damage.saturating_mul(crit_multiplier as u64) / 100;
    }

    damage.max(min_damage as u64).min(u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(attack: u32, defense: u32, critical: bool) -> DamageInput {
        DamageInput {
            attack,
            defense,
            power: 100,
            attack_element: Element::Neutral,
            defender_element: Element::Neutral,
            critical,
        }
    }

    #[test]
    fn armor_halves_at_armor_constant() {
        assert_eq!(calculate_damage(&input(100, 0, false), 100, 150, 1), 100);
        assert_eq!(calculate_damage(&input(100, 100, false), 100, 150, 1), 50);
    }

    #[test]
    fn crit_and_element_multiply() {
        assert_eq!(calculate_damage(&input(100, 100, true), 100, 150, 1), 75);

        let fire_on_grass = DamageInput {
            attack_element: Element::Fire,
            defender_element: Element::Grass,
            ..input(40, 0, false)
        };
        assert_eq!(calculate_damage(&fire_on_grass, 100, 150, 1), 60);

        let grass_on_fire = DamageInput {
            attack_element: Element::Grass,
            defender_element: Element::Fire,
            ..input(40, 0, false)
        };
        assert_eq!(calculate_damage(&grass_on_fire, 100, 150, 1), 30);
    }

    #[test]
    fn minimum_damage_floor() {
        assert_eq!(calculate_damage(&input(1, 10_000, false), 100, 150, 1), 1);
        assert_eq!(calculate_damage(&input(0, 0, false), 100, 150, 5), 5);
    }

    #[test]
    fn large_values_do_not_overflow() {
        let huge = DamageInput {
            power: 1_000,
            ..input(u32::MAX, 0, true)
        };
        assert_eq!(calculate_damage(&huge, 100, 150, 1), u32::MAX);
    }

    #[test]
    fn extreme_power_and_crit_multiplier_saturate() {
        let extreme = DamageInput {
            power: u32::MAX,
            attack_element: Element::Fire,
            defender_element: Element::Grass,
            ..input(u32::MAX, 50, true)
        };
        assert_eq!(calculate_damage(&extreme, 100, u32::MAX, 1), u32::MAX);
    }
}
