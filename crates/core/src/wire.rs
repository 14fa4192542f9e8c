//! Story wire models and the content wrapper decoder.
//!
//! Responsibilities:
//! - Define the JSON wire model for a story and its content elements
//! - Surface type mismatches with the failing path (for example `contents[1].duration`)
//! - Turn one raw content element into a [`ContentWrapper`], the transient record the story
//!   decoder dispatches on
//!
//! Notes:
//! - Required fields are modelled as `Option` on the wire so that an absent field is reported
//!   as [`DecodeError::MissingField`] rather than a generic schema error. `null` counts as absent.
//! - Unknown keys are ignored.
//! - `contentNature` and `interactionUrl` are lenient: any JSON value is accepted and
//!   unrecognised values degrade to `builtIn` and "no link" respectively.

use crate::constants::CONTENTS_KEY;
use crate::{DecodeError, DecodeResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use story_assets::{parse_link, Url};
use story_types::ContentKind;

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of a story.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoryWire {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub preview_asset: Option<String>,

    #[serde(default)]
    pub content_nature: Option<serde_json::Value>,

    #[serde(default)]
    pub ident: Option<String>,

    #[serde(default)]
    pub contents: Option<Vec<ContentWire>>,
}

/// Wire representation of one content element.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContentWire {
    #[serde(default)]
    pub content_type: Option<String>,

    #[serde(default)]
    pub asset_name: Option<String>,

    #[serde(default)]
    pub interaction_url: Option<serde_json::Value>,

    #[serde(default)]
    pub duration: Option<f64>,
}

// ============================================================================
// Transient decode record
// ============================================================================

/// A decoded content element before its asset is resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentWrapper {
    pub content_type: ContentKind,
    /// Raw asset string, resolved later into an asset reference.
    pub asset_name: String,
    /// Present only when the wire value was a string holding a valid link.
    pub interaction_url: Option<Url>,
    /// Display duration in seconds.
    pub duration: f64,
}

impl ContentWrapper {
    /// Validate one wire element. `prefix` is prepended to field names in errors.
    pub(crate) fn from_wire(wire: ContentWire, prefix: &str) -> DecodeResult<Self> {
        let raw_type = required(wire.content_type, prefix, "contentType")?;
        let content_type =
            ContentKind::from_wire(&raw_type).ok_or_else(|| DecodeError::UnknownContentType {
                field: field_path(prefix, "contentType"),
                value: raw_type.clone(),
            })?;
        let asset_name = required(wire.asset_name, prefix, "assetName")?;
        let duration = required(wire.duration, prefix, "duration")?;
        let interaction_url = wire
            .interaction_url
            .and_then(|raw| lenient_link(raw, prefix));

        Ok(Self {
            content_type,
            asset_name,
            interaction_url,
            duration,
        })
    }
}

/// Decode a single raw content element.
///
/// # Errors
///
/// Returns [`DecodeError::MissingField`] when `contentType`, `assetName` or `duration` is
/// absent, [`DecodeError::UnknownContentType`] when the discriminator is not a known kind, and
/// [`DecodeError::Schema`] when a field has the wrong JSON type.
pub fn decode_wrapper(raw: serde_json::Value) -> DecodeResult<ContentWrapper> {
    let wire: ContentWire = from_value(raw)?;
    ContentWrapper::from_wire(wire, "")
}

/// Field path for the `index`th content element.
pub(crate) fn content_prefix(story_prefix: &str, index: usize) -> String {
    format!("{story_prefix}{CONTENTS_KEY}[{index}].")
}

pub(crate) fn field_path(prefix: &str, field: &str) -> String {
    format!("{prefix}{field}")
}

pub(crate) fn required<T>(value: Option<T>, prefix: &str, field: &str) -> DecodeResult<T> {
    value.ok_or_else(|| DecodeError::MissingField {
        field: field_path(prefix, field),
    })
}

fn lenient_link(raw: serde_json::Value, prefix: &str) -> Option<Url> {
    let link = match raw {
        serde_json::Value::String(s) => parse_link(&s).ok_or(s),
        serde_json::Value::Null => return None,
        other => Err(other.to_string()),
    };

    match link {
        Ok(url) => Some(url),
        Err(raw) => {
            tracing::warn!(
                field = %field_path(prefix, "interactionUrl"),
                value = %raw,
                "dropping malformed interaction URL"
            );
            None
        }
    }
}

// ============================================================================
// Deserialisation helpers (internal)
// ============================================================================

/// Deserialize JSON bytes into a wire type, reporting the failing path on mismatch.
pub(crate) fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> DecodeResult<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let parsed = serde_path_to_error::deserialize(&mut deserializer).map_err(path_error)?;
    deserializer.end().map_err(DecodeError::InvalidJson)?;
    Ok(parsed)
}

/// Deserialize an already parsed JSON value into a wire type.
pub(crate) fn from_value<T: DeserializeOwned>(value: serde_json::Value) -> DecodeResult<T> {
    serde_path_to_error::deserialize(value).map_err(path_error)
}

fn path_error(err: serde_path_to_error::Error<serde_json::Error>) -> DecodeError {
    let path = err.path().to_string();
    let source = err.into_inner();
    if source.is_syntax() || source.is_eof() || source.is_io() {
        return DecodeError::InvalidJson(source);
    }

    let path = if path.is_empty() || path == "." {
        "<root>".to_string()
    } else {
        path
    };
    DecodeError::Schema {
        path,
        message: source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_complete_wrapper() {
        let wrapper = decode_wrapper(json!({
            "contentType": "video",
            "assetName": "intro.mp4",
            "interactionUrl": "https://example.com/shop",
            "duration": 12.5
        }))
        .expect("valid wrapper");

        assert_eq!(wrapper.content_type, ContentKind::Video);
        assert_eq!(wrapper.asset_name, "intro.mp4");
        assert_eq!(
            wrapper.interaction_url.as_ref().map(Url::as_str),
            Some("https://example.com/shop")
        );
        assert_eq!(wrapper.duration, 12.5);
    }

    #[test]
    fn integer_duration_is_accepted() {
        let wrapper = decode_wrapper(json!({
            "contentType": "image",
            "assetName": "a.png",
            "duration": 3
        }))
        .expect("valid wrapper");
        assert_eq!(wrapper.duration, 3.0);
        assert!(wrapper.interaction_url.is_none());
    }

    #[test]
    fn malformed_interaction_url_is_dropped() {
        for raw in [json!("not a url"), json!(42), json!({"href": "x"}), json!(null)] {
            let wrapper = decode_wrapper(json!({
                "contentType": "image",
                "assetName": "a.png",
                "interactionUrl": raw,
                "duration": 3
            }))
            .expect("bad link must not fail the element");
            assert!(wrapper.interaction_url.is_none());
        }
    }

    #[test]
    fn unknown_content_type_fails() {
        let err = decode_wrapper(json!({
            "contentType": "gif",
            "assetName": "a.gif",
            "duration": 3
        }))
        .expect_err("unknown type");

        match err {
            DecodeError::UnknownContentType { field, value } => {
                assert_eq!(field, "contentType");
                assert_eq!(value, "gif");
            }
            other => panic!("expected UnknownContentType, got {other:?}"),
        }
    }

    #[test]
    fn missing_required_fields_are_named() {
        let cases = [
            (json!({"assetName": "a.png", "duration": 3}), "contentType"),
            (json!({"contentType": "image", "duration": 3}), "assetName"),
            (json!({"contentType": "image", "assetName": "a.png"}), "duration"),
            (
                json!({"contentType": "image", "assetName": null, "duration": 3}),
                "assetName",
            ),
        ];

        for (raw, expected) in cases {
            match decode_wrapper(raw).expect_err("missing field") {
                DecodeError::MissingField { field } => assert_eq!(field, expected),
                other => panic!("expected MissingField, got {other:?}"),
            }
        }
    }

    #[test]
    fn wrong_type_reports_path() {
        let err = decode_wrapper(json!({
            "contentType": "image",
            "assetName": "a.png",
            "duration": "three"
        }))
        .expect_err("wrong type");

        match err {
            DecodeError::Schema { path, .. } => assert_eq!(path, "duration"),
            other => panic!("expected Schema, got {other:?}"),
        }
    }

    #[test]
    fn prefix_is_applied_to_field_paths() {
        let wire = ContentWire {
            content_type: Some("image".into()),
            asset_name: None,
            interaction_url: None,
            duration: Some(1.0),
        };

        match ContentWrapper::from_wire(wire, &content_prefix("", 2)).expect_err("missing") {
            DecodeError::MissingField { field } => assert_eq!(field, "contents[2].assetName"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn syntax_errors_are_invalid_json() {
        let err = from_slice::<StoryWire>(b"{\"name\": ").expect_err("truncated");
        assert!(matches!(err, DecodeError::InvalidJson(_)));

        let err = from_slice::<StoryWire>(b"{} trailing").expect_err("trailing");
        assert!(matches!(err, DecodeError::InvalidJson(_)));
    }
}
