//! Bounded priority queue of waiting matches.
//!
//! Higher priority dispatches first; equal priorities dispatch in submission
//! order, enforced by a monotonically increasing ticket.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use battle_core::{BattleMatch, MatchId};

/// A match waiting for a worker.
#[derive(Debug)]
pub(crate) struct QueuedMatch {
    pub priority: i32,
    pub ticket: u64,
    pub battle: BattleMatch,
}

impl PartialEq for QueuedMatch {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.ticket == other.ticket
    }
}

impl Eq for QueuedMatch {}

impl PartialOrd for QueuedMatch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedMatch {
    // Max-heap: greater priority first, then the older (smaller) ticket.
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.ticket.cmp(&self.ticket))
    }
}

#[derive(Debug)]
pub(crate) struct MatchQueue {
    heap: BinaryHeap<QueuedMatch>,
    capacity: usize,
    next_ticket: u64,
}

impl MatchQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            capacity,
            next_ticket: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// Enqueues unless full; a rejected match is handed back untouched.
    pub fn push(&mut self, battle: BattleMatch, priority: i32) -> Result<(), BattleMatch> {
        if self.is_full() {
            return Err(battle);
        }
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.heap.push(QueuedMatch {
            priority,
            ticket,
            battle,
        });
        Ok(())
    }

    pub fn pop(&mut self) -> Option<QueuedMatch> {
        self.heap.pop()
    }

    /// Removes a waiting match. Returns false if it is not queued.
    pub fn remove(&mut self, match_id: &MatchId) -> bool {
        let before = self.heap.len();
        self.heap.retain(|queued| queued.battle.id() != match_id);
        self.heap.len() != before
    }

    /// Empties the queue, returning the removed matches in dispatch order.
    pub fn drain(&mut self) -> Vec<QueuedMatch> {
        let mut drained = Vec::with_capacity(self.heap.len());
        while let Some(queued) = self.heap.pop() {
            drained.push(queued);
        }
        drained
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use battle_core::{Character, CharacterId, CharacterStats, Element, create_match};

    use super::*;

    fn battle(id: &str) -> BattleMatch {
        let fighter = |n| {
            Arc::new(Character::new(
                CharacterId(n),
                "Q",
                Element::Neutral,
                CharacterStats::new(10, 1, 1, 1, 1, 1),
            ))
        };
        create_match(vec![fighter(1)], vec![fighter(2)], id, None, 0).unwrap()
    }

    fn ids(queue: &mut MatchQueue) -> Vec<String> {
        queue
            .drain()
            .into_iter()
            .map(|q| q.battle.id().to_string())
            .collect()
    }

    #[test]
    fn higher_priority_then_fifo() {
        let mut queue = MatchQueue::new(10);
        queue.push(battle("low-1"), 1).unwrap();
        queue.push(battle("high"), 5).unwrap();
        queue.push(battle("low-2"), 1).unwrap();
        queue.push(battle("negative"), -3).unwrap();

        assert_eq!(ids(&mut queue), vec!["high", "low-1", "low-2", "negative"]);
    }

    #[test]
    fn full_queue_hands_match_back() {
        let mut queue = MatchQueue::new(1);
        queue.push(battle("a"), 0).unwrap();
        let rejected = queue.push(battle("b"), 9).unwrap_err();

        assert_eq!(rejected.id().as_str(), "b");
        assert_eq!(queue.len(), 1);
        assert!(queue.is_full());
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut queue = MatchQueue::new(10);
        for id in ["a", "b", "c"] {
            queue.push(battle(id), 0).unwrap();
        }

        assert!(queue.remove(&MatchId::from("b")));
        assert!(!queue.remove(&MatchId::from("b")));
        assert_eq!(ids(&mut queue), vec!["a", "c"]);
    }
}
