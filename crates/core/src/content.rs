//! Story content items.
//!
//! A content item is one media unit inside a story. The set of variants is closed: every
//! variant carries the same [`ContentItem`] record and differs only in how a consumer renders
//! it. Matching on [`StoryContent`] is therefore exhaustive, and adding a variant forces every
//! consumer (including the decoder dispatch) to handle it.
//!
//! Nature is assigned by the owning story. Items built by [`StoryContent::new`] start as
//! `builtIn`; the decoder and [`crate::Story`] overwrite that with the story's own nature
//! before the item becomes reachable from a story.

use std::time::Duration;
use story_assets::{AssetReference, Url};
use story_types::{ContentKind, ContentNature};
use story_uuid::ContentId;

/// Shared field record of every content variant.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentItem {
    id: ContentId,
    asset_reference: AssetReference,
    external_interaction_url: Option<Url>,
    duration_secs: f64,
    content_nature: ContentNature,
}

impl ContentItem {
    pub fn id(&self) -> ContentId {
        self.id
    }

    pub fn asset_reference(&self) -> &AssetReference {
        &self.asset_reference
    }

    pub fn external_interaction_url(&self) -> Option<&Url> {
        self.external_interaction_url.as_ref()
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn content_nature(&self) -> ContentNature {
        self.content_nature
    }
}

/// One media unit of a story.
#[derive(Clone, Debug, PartialEq)]
pub enum StoryContent {
    Image(ContentItem),
    Video(ContentItem),
}

impl StoryContent {
    /// Builds an item of the given kind with a fresh identity.
    pub fn new(
        kind: ContentKind,
        asset_reference: AssetReference,
        external_interaction_url: Option<Url>,
        duration_secs: f64,
    ) -> Self {
        let item = ContentItem {
            id: ContentId::new(),
            asset_reference,
            external_interaction_url,
            duration_secs,
            content_nature: ContentNature::default(),
        };

        match kind {
            ContentKind::Image => StoryContent::Image(item),
            ContentKind::Video => StoryContent::Video(item),
        }
    }

    pub fn image(
        asset_reference: AssetReference,
        external_interaction_url: Option<Url>,
        duration_secs: f64,
    ) -> Self {
        Self::new(
            ContentKind::Image,
            asset_reference,
            external_interaction_url,
            duration_secs,
        )
    }

    pub fn video(
        asset_reference: AssetReference,
        external_interaction_url: Option<Url>,
        duration_secs: f64,
    ) -> Self {
        Self::new(
            ContentKind::Video,
            asset_reference,
            external_interaction_url,
            duration_secs,
        )
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            StoryContent::Image(_) => ContentKind::Image,
            StoryContent::Video(_) => ContentKind::Video,
        }
    }

    /// The shared field record, whatever the variant.
    pub fn item(&self) -> &ContentItem {
        match self {
            StoryContent::Image(item) | StoryContent::Video(item) => item,
        }
    }

    fn item_mut(&mut self) -> &mut ContentItem {
        match self {
            StoryContent::Image(item) | StoryContent::Video(item) => item,
        }
    }

    pub fn id(&self) -> ContentId {
        self.item().id()
    }

    pub fn asset_reference(&self) -> &AssetReference {
        self.item().asset_reference()
    }

    pub fn external_interaction_url(&self) -> Option<&Url> {
        self.item().external_interaction_url()
    }

    /// Display duration in seconds, as given on the wire.
    pub fn duration_secs(&self) -> f64 {
        self.item().duration_secs()
    }

    /// Display duration, or `None` when the seconds value is negative or not finite.
    pub fn duration(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.duration_secs()).ok()
    }

    pub fn content_nature(&self) -> ContentNature {
        self.item().content_nature()
    }

    /// Second construction phase: stamp the owning story's nature.
    pub(crate) fn with_nature(mut self, nature: ContentNature) -> Self {
        self.set_content_nature(nature);
        self
    }

    pub(crate) fn set_content_nature(&mut self, nature: ContentNature) {
        self.item_mut().content_nature = nature;
    }
}
