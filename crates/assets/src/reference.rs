//! Resolution of raw asset strings.

use crate::{AssetError, AssetResult, ResourceBundle, ResourceHandle};
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Resolved pointer to media data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetReference {
    /// Asset lives at an absolute URL.
    Remote(Url),
    /// Asset is a bundled resource.
    Local(ResourceHandle),
}

impl AssetReference {
    pub fn is_remote(&self) -> bool {
        matches!(self, AssetReference::Remote(_))
    }

    pub fn as_remote(&self) -> Option<&Url> {
        match self {
            AssetReference::Remote(url) => Some(url),
            AssetReference::Local(_) => None,
        }
    }

    pub fn as_local(&self) -> Option<&ResourceHandle> {
        match self {
            AssetReference::Remote(_) => None,
            AssetReference::Local(handle) => Some(handle),
        }
    }
}

impl fmt::Display for AssetReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetReference::Remote(url) => write!(f, "remote:{url}"),
            AssetReference::Local(handle) => write!(f, "local:{}", handle.name()),
        }
    }
}

/// Returns the URL when `raw` is a well-formed absolute URL.
///
/// Relative strings such as `cover.png` or `covers/a.png` are not URLs. Any string with a
/// scheme prefix is, even without a host: `cover:a.png` parses as a URL with scheme `cover`
/// and is never looked up in a bundle.
pub fn parse_absolute_url(raw: &str) -> Option<Url> {
    Url::parse(raw).ok()
}

/// Returns the URL when `raw` is usable as an external interaction link.
///
/// A link must be an absolute URL with a host, so `not a url` and `mailto:x` are both rejected.
pub fn parse_link(raw: &str) -> Option<Url> {
    parse_absolute_url(raw.trim()).filter(Url::has_host)
}

/// Turns raw asset strings into [`AssetReference`]s.
///
/// Resolution order: URL parse first, bundle lookup only when that fails.
#[derive(Clone)]
pub struct AssetResolver {
    bundle: Arc<dyn ResourceBundle>,
}

impl AssetResolver {
    pub fn new(bundle: Arc<dyn ResourceBundle>) -> Self {
        Self { bundle }
    }

    pub fn bundle(&self) -> &dyn ResourceBundle {
        self.bundle.as_ref()
    }

    /// Resolves `raw` into a remote or local reference.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::NotFound`] when `raw` is not an absolute URL and no bundled
    /// resource has that name.
    pub fn resolve(&self, raw: &str) -> AssetResult<AssetReference> {
        if let Some(url) = parse_absolute_url(raw) {
            return Ok(AssetReference::Remote(url));
        }

        self.bundle
            .lookup(raw)
            .map(AssetReference::Local)
            .ok_or_else(|| AssetError::NotFound(raw.to_owned()))
    }
}

impl fmt::Debug for AssetResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetResolver").finish_non_exhaustive()
    }
}
