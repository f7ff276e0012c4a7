//! Broadcast-backed event bus.

use tokio::sync::broadcast;

use super::ReloadEvent;

/// Fan-out channel for [`ReloadEvent`]s.
///
/// Publishing is best-effort: events sent while nobody is subscribed are
/// dropped.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ReloadEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, event: ReloadEvent) {
        if self.sender.send(event).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!(target: "runtime::events", "No subscribers for reload event");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReloadEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ammo_core::{ActorId, ItemId, TokenId};

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = EventBus::with_capacity(4);
        bus.publish(ReloadEvent::SceneReloaded {
            reloaded: 0,
            failures: 0,
        });

        let mut rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        let event = ReloadEvent::WeaponReloaded {
            actor: ActorId(1),
            token: TokenId(2),
            weapon: ItemId(3),
        };
        bus.publish(event.clone());

        assert_eq!(rx.recv().await.unwrap(), event);
    }
}
