//! Story event publishing.

use crate::constants::{EVENT_BUS_CAPACITY, STORY_IDENT_PAYLOAD_KEY, STORY_SEEN_EVENT};
use story_uuid::StoryId;
use tokio::sync::broadcast;

/// Events announced by the core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoryEvent {
    /// A story moved from unseen to seen.
    Seen { story_id: StoryId },
}

impl StoryEvent {
    /// Event name as seen by subscribers.
    pub fn name(&self) -> &'static str {
        match self {
            StoryEvent::Seen { .. } => STORY_SEEN_EVENT,
        }
    }

    /// Event payload, for example `{"storyIdent": "E621E1F8-..."}`.
    pub fn payload(&self) -> serde_json::Value {
        match self {
            StoryEvent::Seen { story_id } => {
                serde_json::json!({ STORY_IDENT_PAYLOAD_KEY: story_id.as_str() })
            }
        }
    }
}

/// Fire-and-forget publish capability.
///
/// `publish` must not block on subscribers. Ordering across different stories is unspecified.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: StoryEvent);
}

/// Event bus backed by a broadcast channel.
///
/// Publishing never waits: with no subscribers the event is dropped, and a subscriber that falls
/// more than the channel capacity behind observes a lag instead of slowing the publisher.
#[derive(Clone, Debug)]
pub struct BroadcastEventBus {
    sender: broadcast::Sender<StoryEvent>,
}

impl Default for BroadcastEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastEventBus {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_BUS_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoryEvent> {
        self.sender.subscribe()
    }
}

impl EventPublisher for BroadcastEventBus {
    fn publish(&self, event: StoryEvent) {
        let name = event.name();
        match self.sender.send(event) {
            Ok(receivers) => tracing::debug!(event = name, receivers, "published story event"),
            Err(_) => tracing::debug!(event = name, "no subscribers for story event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[test]
    fn seen_event_name_and_payload() {
        let event = StoryEvent::Seen {
            story_id: StoryId::from_wire("story-1".into()),
        };
        assert_eq!(event.name(), "storySeen");
        assert_eq!(event.payload(), serde_json::json!({"storyIdent": "story-1"}));
    }

    #[test]
    fn publish_without_subscribers_does_not_fail() {
        let bus = BroadcastEventBus::new();
        bus.publish(StoryEvent::Seen {
            story_id: StoryId::generate(),
        });
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = BroadcastEventBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();
        let story_id = StoryId::from_wire("story-1".into());

        bus.publish(StoryEvent::Seen {
            story_id: story_id.clone(),
        });

        let expected = StoryEvent::Seen { story_id };
        assert_eq!(first.recv().await.unwrap(), expected);
        assert_eq!(second.recv().await.unwrap(), expected);
        assert_eq!(first.try_recv(), Err(TryRecvError::Empty));
    }
}
