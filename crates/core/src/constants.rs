//! Constants used throughout the story core crate.
//!
//! Wire keys, persistence keys and event names live here so that every module agrees on them.

/// Prefix of the persisted seen flag key. The full key is this prefix followed by the story id.
pub const SEEN_KEY_PREFIX: &str = "isStorySeen_";

/// Name of the event published when a story becomes seen.
pub const STORY_SEEN_EVENT: &str = "storySeen";

/// Payload key carrying the story identity in published events.
pub const STORY_IDENT_PAYLOAD_KEY: &str = "storyIdent";

/// Default directory for bundled resources when no explicit directory is configured.
pub const DEFAULT_RESOURCES_DIR: &str = "resources";

/// Default file backing the persisted seen flags.
pub const DEFAULT_SEEN_STORE_FILENAME: &str = ".story-seen.json";

/// Buffer size of the broadcast event bus. Slow subscribers lag rather than block publishers.
pub const EVENT_BUS_CAPACITY: usize = 64;

/// Wire key of the content array.
pub(crate) const CONTENTS_KEY: &str = "contents";
