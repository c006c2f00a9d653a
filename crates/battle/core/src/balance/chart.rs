//! Elemental advantage chart.
//!
//! ```text
//! Fire > Grass > Water > Fire
//! Light <> Dark (each strong against the other)
//! ```
//!
//! Multipliers are integer percentages applied to raw damage.

use crate::model::Element;

pub const ADVANTAGE: u32 = 150;
pub const RESISTED: u32 = 75;
pub const NEUTRAL: u32 = 100;

/// Damage multiplier (percent) for an attack of `attacker` element against a
/// defender of `defender` element.
pub const fn elemental_multiplier(attacker: Element, defender: Element) -> u32 {
    use Element::*;

    match (attacker, defender) {
        (Fire, Grass) | (Grass, Water) | (Water, Fire) => ADVANTAGE,
        (Grass, Fire) | (Water, Grass) | (Fire, Water) => RESISTED,
        (Light, Dark) | (Dark, Light) => ADVANTAGE,
        _ => NEUTRAL,
    }
}
