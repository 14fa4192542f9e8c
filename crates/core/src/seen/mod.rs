//! Seen-state tracking.
//!
//! A story is seen once the user has viewed it. The flag is persisted through an injected
//! [`FlagStore`] under `<prefix><story id>`, so it is stable across restarts and distinct
//! stories never share a key. The first transition to seen publishes a
//! [`StoryEvent::Seen`] on the injected [`EventPublisher`]; later calls are no-ops. A seen
//! story never becomes unseen.

mod events;
mod store;

pub use events::{BroadcastEventBus, EventPublisher, StoryEvent};
pub use store::{FlagStore, InMemoryFlagStore, JsonFileFlagStore};

use crate::config::CoreConfig;
use crate::constants::SEEN_KEY_PREFIX;
use crate::SeenResult;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use story_uuid::StoryId;

/// Persistent per-story seen flag with change notification.
pub struct SeenStateTracker {
    store: Arc<dyn FlagStore>,
    publisher: Arc<dyn EventPublisher>,
    key_prefix: String,
    // Serialises the read-then-write in `mark_seen`.
    transition: Mutex<()>,
}

impl SeenStateTracker {
    /// Tracker using the standard `isStorySeen_` key prefix.
    pub fn new(store: Arc<dyn FlagStore>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            store,
            publisher,
            key_prefix: SEEN_KEY_PREFIX.to_owned(),
            transition: Mutex::new(()),
        }
    }

    /// Tracker using the key prefix from `config`.
    pub fn from_config(
        config: &CoreConfig,
        store: Arc<dyn FlagStore>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            key_prefix: config.seen_key_prefix().as_str().to_owned(),
            ..Self::new(store, publisher)
        }
    }

    /// Persistence key for `story_id`.
    pub fn seen_key(&self, story_id: &StoryId) -> String {
        format!("{}{}", self.key_prefix, story_id)
    }

    pub fn is_seen(&self, story_id: &StoryId) -> bool {
        self.store.get(&self.seen_key(story_id))
    }

    /// Marks `story_id` as seen.
    ///
    /// Returns `true` when this call moved the story from unseen to seen, in which case exactly
    /// one [`StoryEvent::Seen`] is published. Returns `false` without writing or publishing
    /// when the story was already seen.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::SeenError`] if the flag cannot be persisted. Nothing is published in
    /// that case.
    pub fn mark_seen(&self, story_id: &StoryId) -> SeenResult<bool> {
        let key = self.seen_key(story_id);
        {
            let _guard = self.transition.lock().unwrap_or_else(PoisonError::into_inner);
            if self.store.get(&key) {
                return Ok(false);
            }
            self.store.set(&key, true)?;
        }

        tracing::debug!(story_id = %story_id, "story marked seen");
        self.publisher.publish(StoryEvent::Seen {
            story_id: story_id.clone(),
        });
        Ok(true)
    }
}

impl fmt::Debug for SeenStateTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeenStateTracker")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}
