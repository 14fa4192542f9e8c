//! Shared primitive types for the story workspace.
//!
//! These types are used by every other crate and carry no I/O:
//! - [`ContentNature`]: where a story and its content come from (`builtIn` or `online`)
//! - [`ContentKind`]: the closed set of content variants the decoder knows how to build
//! - [`NonEmptyText`]: a trimmed string guaranteed to hold at least one character

use std::fmt;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Nature of a story and of every content item inside it.
///
/// On the wire this is an integer discriminator: `0` is `builtIn`, `1` is `online`.
/// Anything else (including a missing value) decodes to [`ContentNature::BuiltIn`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContentNature {
    /// Assets ship with the application bundle.
    #[default]
    BuiltIn,
    /// Assets are fetched from a remote source.
    Online,
}

impl ContentNature {
    /// Integer discriminator used on the wire.
    pub fn raw_value(self) -> i64 {
        match self {
            ContentNature::BuiltIn => 0,
            ContentNature::Online => 1,
        }
    }

    /// Strict lookup by integer discriminator.
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(ContentNature::BuiltIn),
            1 => Some(ContentNature::Online),
            _ => None,
        }
    }

    /// Lenient decode from an arbitrary JSON value.
    ///
    /// Only integer values `0` and `1` are recognised. Every other value, including
    /// `null`, strings and floats, maps to [`ContentNature::BuiltIn`].
    pub fn from_wire(value: Option<&serde_json::Value>) -> Self {
        value
            .and_then(serde_json::Value::as_i64)
            .and_then(Self::from_raw)
            .unwrap_or_default()
    }

    /// Maps the `builtIn` flag used by programmatic constructors.
    pub fn from_builtin_flag(built_in: bool) -> Self {
        if built_in {
            ContentNature::BuiltIn
        } else {
            ContentNature::Online
        }
    }

    pub fn is_built_in(self) -> bool {
        self == ContentNature::BuiltIn
    }

    fn as_str(self) -> &'static str {
        match self {
            ContentNature::BuiltIn => "builtIn",
            ContentNature::Online => "online",
        }
    }
}

impl fmt::Display for ContentNature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminator of a content item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Image,
    Video,
}

impl ContentKind {
    /// Convert to the wire discriminator string.
    pub fn to_wire(self) -> &'static str {
        match self {
            ContentKind::Image => "image",
            ContentKind::Video => "video",
        }
    }

    /// Parse from the wire discriminator string.
    ///
    /// Matching is exact; `"Image"` is not a known kind.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "image" => Some(ContentKind::Image),
            "video" => Some(ContentKind::Video),
            _ => None,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_wire())
    }
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err(TextError::Empty)` if the input is empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
