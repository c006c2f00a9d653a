//! Immutable battle inputs: characters and everything they carry into a match.
//!
//! Templates here are never mutated by the engine. Per-match state lives in
//! [`crate::state`], which holds a shared reference to each character.

mod character;
mod effect;
mod element;
mod passive;
mod skill;
mod stats;

pub use character::{Character, CharacterId};
pub use effect::{
    BuffEffect, DamageEffect, DebuffEffect, Effect, EffectTarget, HealEffect, StatusEffect,
};
pub use element::{Element, Rarity};
pub use passive::{PassiveAbility, PassiveTrigger};
pub use skill::{Skill, SkillKind, TargetRule};
pub use stats::{Chance, CharacterStats, Stat};
