//! Balance tables and pure formulas.
//!
//! Everything here is a total function over closed enumerations or plain
//! integers. Tables are static so a lookup never fails and never allocates.

pub mod chart;
pub mod definitions;
pub mod formulas;

pub use chart::elemental_multiplier;
pub use definitions::{
    BuffDefinition, BuffId, DebuffDefinition, DebuffId, Modifier, OverwriteRule, StackingRule,
    StatusDefinition, StatusId, buff_definition, debuff_definition, status_definition,
};
pub use formulas::{armor_reduction, crit_chance, evasion};
