//! Hit chance and accuracy calculations.

use crate::balance::formulas;
use crate::model::Chance;

/// Calculate hit chance based on skill accuracy vs defender evasion.
///
/// # Formula
///
/// ```text
/// evasion    = min(speed * evasion_per_speed, MAX_EVASION)
/// hit_chance = accuracy - evasion   (clamped at 0)
/// ```
pub fn calculate_hit_chance(accuracy: Chance, defender_speed: u32, evasion_per_speed: u16) -> Chance {
    accuracy.saturating_sub(formulas::evasion(defender_speed, evasion_per_speed))
}

/// Check if an attack hits given a uniform roll in `0..10000`.
///
/// # Returns
///
/// `true` if attack hits, `false` if it misses.
pub fn check_hit(accuracy: Chance, defender_speed: u32, evasion_per_speed: u16, roll: u16) -> bool {
    calculate_hit_chance(accuracy, defender_speed, evasion_per_speed).succeeds(roll)
}
