//! Active buff, debuff and status containers.
//!
//! # Round-based Duration
//!
//! Effects store `remaining` rounds. The engine decrements every effect once
//! at round end and removes those that reach zero, reporting each removal.

use arrayvec::ArrayVec;

use crate::balance::{BuffId, DebuffId, OverwriteRule, StackingRule, StatusId};
use crate::config::BattleConfig;

/// A single active effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect<K> {
    pub id: K,
    pub remaining: u8,
    pub stacks: u8,
}

/// Result of applying an effect to a stack.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum StackOutcome {
    /// Newly added with one stack.
    Applied,
    /// One more stack, duration reset.
    Stacked,
    /// Duration reset, stack count unchanged.
    Refreshed,
    /// Nothing changed.
    Ignored,
}

/// Outcome plus the resulting stack and duration, as recorded in the log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Application {
    pub outcome: StackOutcome,
    pub stacks: u8,
    pub remaining: u8,
}

/// Reference to any active effect, used when reporting expiry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum EffectRef {
    Buff(BuffId),
    Debuff(DebuffId),
    Status(StatusId),
}

impl core::fmt::Display for EffectRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Buff(id) => write!(f, "buff:{id}"),
            Self::Debuff(id) => write!(f, "debuff:{id}"),
            Self::Status(id) => write!(f, "status:{id}"),
        }
    }
}

/// Bounded, insertion-ordered set of active effects of one category.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectStack<K> {
    effects: ArrayVec<ActiveEffect<K>, { BattleConfig::MAX_ACTIVE_EFFECTS }>,
}

impl<K> Default for EffectStack<K> {
    fn default() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }
}

impl<K: Copy + Eq> EffectStack<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: K) -> Option<&ActiveEffect<K>> {
        self.effects.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: K) -> bool {
        self.get(id).is_some()
    }

    /// Applies `id` following `rule`.
    ///
    /// A new effect on a full stack is ignored.
    pub fn apply(&mut self, id: K, duration: u8, rule: StackingRule) -> Application {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.id == id) {
            let outcome = match (rule.stackable, rule.overwrite) {
                (true, OverwriteRule::Stack) if existing.stacks < rule.max_stacks => {
                    existing.stacks += 1;
                    existing.remaining = duration;
                    StackOutcome::Stacked
                }
                (true, OverwriteRule::Stack) | (_, OverwriteRule::Refresh) => {
                    existing.remaining = duration;
                    StackOutcome::Refreshed
                }
                (false, OverwriteRule::Stack) | (_, OverwriteRule::Ignore) => StackOutcome::Ignored,
            };
            return Application {
                outcome,
                stacks: existing.stacks,
                remaining: existing.remaining,
            };
        }

        let effect = ActiveEffect {
            id,
            remaining: duration,
            stacks: 1,
        };
        match self.effects.try_push(effect) {
            Ok(()) => Application {
                outcome: StackOutcome::Applied,
                stacks: 1,
                remaining: duration,
            },
            Err(_) => Application {
                outcome: StackOutcome::Ignored,
                stacks: 0,
                remaining: 0,
            },
        }
    }

    /// Decrements every duration and removes effects that reach zero.
    ///
    /// Returns the removed ids in insertion order.
    pub fn tick(&mut self) -> ArrayVec<K, { BattleConfig::MAX_ACTIVE_EFFECTS }> {
        let mut expired = ArrayVec::new();
        self.effects.retain(|effect| {
            effect.remaining = effect.remaining.saturating_sub(1);
            if effect.remaining == 0 {
                expired.push(effect.id);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect<K>> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::{BuffId, StatusId};

    #[test]
    fn stack_rule_adds_stacks_up_to_cap() {
        let mut stack = EffectStack::new();
        let rule = StackingRule::stacking(2);

        assert_eq!(stack.apply(BuffId::AttackUp, 3, rule).outcome, StackOutcome::Applied);
        stack.tick();
        let second = stack.apply(BuffId::AttackUp, 3, rule);
        assert_eq!(second.outcome, StackOutcome::Stacked);
        assert_eq!((second.stacks, second.remaining), (2, 3));

        let capped = stack.apply(BuffId::AttackUp, 3, rule);
        assert_eq!(capped.outcome, StackOutcome::Refreshed);
        assert_eq!(capped.stacks, 2);
    }

    #[test]
    fn refresh_and_ignore_rules() {
        let mut stack = EffectStack::new();

        stack.apply(StatusId::Freeze, 2, StackingRule::refresh());
        stack.tick();
        assert_eq!(stack.get(StatusId::Freeze).map(|e| e.remaining), Some(1));
        let refreshed = stack.apply(StatusId::Freeze, 2, StackingRule::refresh());
        assert_eq!(refreshed.outcome, StackOutcome::Refreshed);
        assert_eq!(refreshed.remaining, 2);

        stack.apply(StatusId::Stun, 1, StackingRule::ignore());
        let ignored = stack.apply(StatusId::Stun, 5, StackingRule::ignore());
        assert_eq!(ignored.outcome, StackOutcome::Ignored);
        assert_eq!(ignored.remaining, 1);
    }

    #[test]
    fn non_stackable_with_stack_rule_is_ignored() {
        let mut stack = EffectStack::new();
        let rule = StackingRule {
            stackable: false,
            max_stacks: 1,
            overwrite: OverwriteRule::Stack,
        };
        stack.apply(BuffId::Keen, 2, rule);
        assert_eq!(stack.apply(BuffId::Keen, 2, rule).outcome, StackOutcome::Ignored);
    }

    #[test]
    fn tick_reports_expired_in_insertion_order() {
        let mut stack = EffectStack::new();
        stack.apply(StatusId::Burn, 1, StackingRule::stacking(2));
        stack.apply(StatusId::Poison, 2, StackingRule::stacking(3));
        stack.apply(StatusId::Stun, 1, StackingRule::ignore());

        let expired = stack.tick();
        assert_eq!(expired.as_slice(), &[StatusId::Burn, StatusId::Stun]);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.tick().as_slice(), &[StatusId::Poison]);
        assert!(stack.is_empty());
    }

    #[test]
    fn full_stack_ignores_new_effects() {
        let mut stack: EffectStack<u8> = EffectStack::new();
        for id in 0..BattleConfig::MAX_ACTIVE_EFFECTS as u8 {
            stack.apply(id, 2, StackingRule::refresh());
        }
        let overflow = stack.apply(200, 2, StackingRule::refresh());
        assert_eq!(overflow.outcome, StackOutcome::Ignored);
        assert_eq!(stack.len(), BattleConfig::MAX_ACTIVE_EFFECTS);

        stack.clear();
        assert!(stack.is_empty());
    }
}
