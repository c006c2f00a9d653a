//! Broadcast-backed event bus.

use tokio::sync::broadcast;

use super::ArenaEvent;

/// Cloneable lifecycle event bus.
///
/// Publishing never blocks; slow subscribers observe `Lagged` rather than
/// slowing the workers down.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ArenaEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(crate::ArenaConfig::DEFAULT_EVENT_BUFFER_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn publish(&self, event: ArenaEvent) {
        if self.tx.send(event).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!("No subscribers for arena events");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ArenaEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use battle_core::MatchId;

    use super::*;

    #[tokio::test]
    async fn subscribers_receive_in_publish_order() {
        let bus = EventBus::with_capacity(8);
        let mut rx = bus.subscribe();
        let id = MatchId::from("m-1");

        bus.publish(ArenaEvent::Queued {
            match_id: id.clone(),
            priority: 2,
        });
        bus.publish(ArenaEvent::Started {
            match_id: id.clone(),
        });

        assert!(matches!(rx.recv().await.unwrap(), ArenaEvent::Queued { priority: 2, .. }));
        assert_eq!(rx.recv().await.unwrap().match_id(), &id);
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(ArenaEvent::Cancelled {
            match_id: MatchId::from("nobody-listens"),
        });
    }
}
