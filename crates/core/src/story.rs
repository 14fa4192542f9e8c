//! The story aggregate.
//!
//! A [`Story`] is constructed in one of three ways:
//! - decoded from the wire by [`crate::StoryDecoder`]
//! - assembled from a single pre-built item with [`Story::with_content`]
//! - as an empty placeholder with [`Story::default`]
//!
//! After construction it only grows: [`Story::add_content`] appends, and the seen flag moves
//! from unseen to seen through [`Story::set_seen`]. Every item in a story carries the story's
//! nature; items entering through any of the paths above are stamped on the way in.

use crate::content::StoryContent;
use crate::error::SeenResult;
use crate::seen::SeenStateTracker;
use story_assets::{Image, Url};
use story_types::ContentNature;
use story_uuid::StoryId;

/// Preview shown for a story in a highlights list.
///
/// Holds the original reference string together with whatever it resolved to. A remote
/// preview is never fetched here, so only local previews can carry a loaded image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreviewImage {
    reference: String,
    remote: Option<Url>,
    image: Option<Image>,
}

impl PreviewImage {
    pub(crate) fn remote(reference: String, url: Url) -> Self {
        Self {
            reference,
            remote: Some(url),
            image: None,
        }
    }

    pub(crate) fn local(reference: String, image: Option<Image>) -> Self {
        Self {
            reference,
            remote: None,
            image,
        }
    }

    /// Wraps an image that is already loaded; the reference is its resource name.
    pub fn from_image(image: Image) -> Self {
        Self {
            reference: image.handle().name().to_owned(),
            remote: None,
            image: Some(image),
        }
    }

    /// The preview reference as it appeared on the wire.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn remote_url(&self) -> Option<&Url> {
        self.remote.as_ref()
    }

    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }
}

/// Named, ordered collection of content items.
#[derive(Clone, Debug)]
pub struct Story {
    id: StoryId,
    name: String,
    preview_image: PreviewImage,
    content_nature: ContentNature,
    content: Vec<StoryContent>,
}

impl Default for Story {
    /// Empty `builtIn` story with a fresh identity.
    fn default() -> Self {
        Self {
            id: StoryId::generate(),
            name: String::new(),
            preview_image: PreviewImage::default(),
            content_nature: ContentNature::BuiltIn,
            content: Vec::new(),
        }
    }
}

impl Story {
    /// Assemble a story programmatically from a single content item.
    ///
    /// `built_in` selects the nature (`true` for `builtIn`, `false` for `online`) and the item
    /// adopts it.
    pub fn with_content(
        content: StoryContent,
        name: impl Into<String>,
        built_in: bool,
        preview: Option<Image>,
        id: StoryId,
    ) -> Self {
        let content_nature = ContentNature::from_builtin_flag(built_in);
        Self {
            id,
            name: name.into(),
            preview_image: preview.map(PreviewImage::from_image).unwrap_or_default(),
            content_nature,
            content: vec![content.with_nature(content_nature)],
        }
    }

    /// Assembles a decoded story. Items must already carry `content_nature`.
    pub(crate) fn from_parts(
        id: StoryId,
        name: String,
        preview_image: PreviewImage,
        content_nature: ContentNature,
        content: Vec<StoryContent>,
    ) -> Self {
        debug_assert!(content.iter().all(|c| c.content_nature() == content_nature));
        Self {
            id,
            name,
            preview_image,
            content_nature,
            content,
        }
    }

    pub fn id(&self) -> &StoryId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn preview_image(&self) -> &PreviewImage {
        &self.preview_image
    }

    pub fn content_nature(&self) -> ContentNature {
        self.content_nature
    }

    /// Items in presentation order.
    pub fn content(&self) -> &[StoryContent] {
        &self.content
    }

    /// Append an item at the end of the presentation order.
    pub fn add_content(&mut self, mut content: StoryContent) {
        content.set_content_nature(self.content_nature);
        self.content.push(content);
    }

    /// Whether this story has been seen, read from the tracker by id.
    pub fn is_seen(&self, tracker: &SeenStateTracker) -> bool {
        tracker.is_seen(&self.id)
    }

    /// Record this story as seen. Returns `true` if this call made the transition.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::SeenError`] if the flag cannot be persisted.
    pub fn set_seen(&self, tracker: &SeenStateTracker) -> SeenResult<bool> {
        tracker.mark_seen(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seen::{BroadcastEventBus, InMemoryFlagStore};
    use std::sync::Arc;
    use story_assets::{AssetReference, ResourceHandle};

    fn image_item() -> StoryContent {
        StoryContent::image(
            AssetReference::Local(ResourceHandle::new("a.png", "a.png")),
            None,
            3.0,
        )
    }

    #[test]
    fn default_story_is_empty_and_built_in() {
        let a = Story::default();
        let b = Story::default();

        assert_eq!(a.content_nature(), ContentNature::BuiltIn);
        assert!(a.content().is_empty());
        assert!(a.preview_image().image().is_none());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn with_content_built_in_round_trip() {
        let id = StoryId::from_wire("story-1".into());
        let story = Story::with_content(image_item(), "Intro", true, None, id.clone());

        assert_eq!(story.id(), &id);
        assert_eq!(story.name(), "Intro");
        assert_eq!(story.content_nature(), ContentNature::BuiltIn);
        assert_eq!(story.content().len(), 1);
        assert_eq!(story.content()[0].content_nature(), ContentNature::BuiltIn);
    }

    #[test]
    fn with_content_online_stamps_item() {
        let story = Story::with_content(image_item(), "Drop", false, None, StoryId::generate());

        assert_eq!(story.content_nature(), ContentNature::Online);
        assert_eq!(story.content()[0].content_nature(), ContentNature::Online);
    }

    #[test]
    fn add_content_appends_in_order_and_adopts_nature() {
        let mut story = Story::with_content(image_item(), "Drop", false, None, StoryId::generate());
        let video = StoryContent::video(
            AssetReference::Local(ResourceHandle::new("b.mp4", "b.mp4")),
            None,
            10.0,
        );
        let video_id = video.id();

        story.add_content(video);

        assert_eq!(story.content().len(), 2);
        assert_eq!(story.content()[1].id(), video_id);
        assert_eq!(story.content()[1].content_nature(), ContentNature::Online);
    }

    #[test]
    fn seen_state_is_tracked_by_id() {
        let tracker = SeenStateTracker::new(
            Arc::new(InMemoryFlagStore::new()),
            Arc::new(BroadcastEventBus::new()),
        );
        let story = Story::default();
        let twin = Story::with_content(image_item(), "Twin", true, None, story.id().clone());

        assert!(!story.is_seen(&tracker));
        assert!(story.set_seen(&tracker).expect("persisted"));
        assert!(story.is_seen(&tracker));
        assert!(twin.is_seen(&tracker));
        assert!(!twin.set_seen(&tracker).expect("persisted"));
    }
}
