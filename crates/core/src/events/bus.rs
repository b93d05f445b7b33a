use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::ContentEvent;

/// In-process event bus backed by `tokio::broadcast`.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<ContentEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: ContentEvent) -> Result<usize, broadcast::error::SendError<ContentEvent>> {
        self.sender.send(event)
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<ContentEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::ContentScope;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(ContentEvent::Loading { scope: ContentScope::Global }).unwrap();

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, ContentEvent::Loading { scope: ContentScope::Global }));
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);

        let cleared = ContentEvent::Cleared {
            scope: ContentScope::Page("about".into()),
        };
        bus.publish(cleared.clone()).unwrap();

        assert_eq!(rx1.recv().await.unwrap(), cleared);
        assert_eq!(rx2.recv().await.unwrap().scope(), &ContentScope::Page("about".into()));
    }

    #[test]
    fn publishing_without_subscribers_is_an_error() {
        let bus = EventBus::default();
        assert!(bus.publish(ContentEvent::Cleared { scope: ContentScope::Global }).is_err());
    }
}
