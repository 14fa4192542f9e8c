//! Internal implementation of the identifier types.

use crate::{UuidError, UuidResult};
use ::uuid::Uuid;
use std::{fmt, str::FromStr};

/// Renders a UUID in uppercase hyphenated form.
fn upper_hyphenated(uuid: Uuid) -> String {
    let mut buf = Uuid::encode_buffer();
    uuid.hyphenated().encode_upper(&mut buf).to_owned()
}

/// Stable identity of a story.
///
/// # Construction
/// - [`StoryId::generate`] allocates a fresh identity (used when the wire omits `ident`).
/// - [`StoryId::from_wire`] keeps a wire-supplied identity verbatim, without normalisation.
/// - [`StoryId::parse`] validates an identity supplied by a user (CLI input), rejecting blank
///   values.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoryId(String);

impl Default for StoryId {
    fn default() -> Self {
        Self::generate()
    }
}

impl StoryId {
    /// Generates a new random identity in UUID form.
    pub fn generate() -> Self {
        Self(upper_hyphenated(Uuid::new_v4()))
    }

    /// Wraps an identity read from the wire exactly as given.
    pub fn from_wire(ident: String) -> Self {
        Self(ident)
    }

    /// Validates a user-supplied identity.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is empty or whitespace-only.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if input.trim().is_empty() {
            return Err(UuidError::InvalidInput(
                "story id cannot be empty".into(),
            ));
        }
        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for StoryId {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StoryId::parse(s)
    }
}

/// Identity of a single content item.
///
/// Every constructed item gets its own random identity, independent of anything on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContentId(Uuid);

impl Default for ContentId {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentId {
    /// Allocates a fresh random content identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&upper_hyphenated(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_upper_hyphenated(s: &str) -> bool {
        s.len() == 36
            && s.char_indices().all(|(i, c)| match i {
                8 | 13 | 18 | 23 => c == '-',
                _ => matches!(c, '0'..='9' | 'A'..='F'),
            })
    }

    #[test]
    fn test_generate_is_uuid_form() {
        let id = StoryId::generate();
        assert!(is_upper_hyphenated(id.as_str()), "got {id}");
    }

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(StoryId::generate(), StoryId::generate());
    }

    #[test]
    fn test_from_wire_is_verbatim() {
        let id = StoryId::from_wire("  my-story ".into());
        assert_eq!(id.as_str(), "  my-story ");
    }

    #[test]
    fn test_parse_rejects_blank() {
        let err = StoryId::parse("   ").expect_err("blank should be rejected");
        assert!(matches!(err, UuidError::InvalidInput(msg) if msg.contains("cannot be empty")));
    }

    #[test]
    fn test_from_str_valid() {
        let id: StoryId = "story-1".parse().expect("valid id");
        assert_eq!(id.to_string(), "story-1");
    }

    #[test]
    fn test_content_ids_are_fresh() {
        let a = ContentId::new();
        let b = ContentId::new();
        assert_ne!(a, b);
        assert!(is_upper_hyphenated(&a.to_string()));
    }
}
