//! Combat resolution system.
//!
//! This module provides pure functions for resolving a single attack against
//! a single target. All combat logic is deterministic and side-effect free:
//! randomness arrives as pre-drawn rolls.
//!
//! # Core Functions
//!
//! - `calculate_hit_chance`: Accuracy vs evasion calculation
//! - `check_hit`: Roll against the hit chance
//! - `calculate_damage`: Full damage pipeline (elemental, armor, crit, floor)

pub mod damage;
pub mod hit;

pub use damage::{DamageInput, calculate_damage};
pub use hit::{calculate_hit_chance, check_hit};
