//! Story and content identity.
//!
//! Two identifier types live here:
//! - [`StoryId`]: the stable identity of a story. It is taken verbatim from the wire when the
//!   payload carries one, and otherwise generated as an uppercase hyphenated UUID string
//!   (for example `E621E1F8-C36C-495A-93FC-0C247A3E6E5F`). Seen state is keyed by this value, so
//!   it must stay stable across process restarts.
//! - [`ContentId`]: a fresh random identity for each content item. It never comes from the wire.

mod service;

// Re-export public types
pub use service::{ContentId, StoryId};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UuidResult<T> = Result<T, UuidError>;
