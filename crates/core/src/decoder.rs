//! Story decoder.
//!
//! Decoding is single pass and all-or-nothing:
//! 1. top-level fields are validated (`name`, `previewAsset`, `contentNature`, `ident`)
//! 2. the preview is resolved; a missing preview is tolerated and logged
//! 3. each element of `contents` becomes a [`ContentWrapper`]
//! 4. the wrapper's asset is resolved and the matching [`StoryContent`] variant is built
//! 5. the item is stamped with the story's nature and appended in wire order
//!
//! Any failure in steps 1, 3 or 4 aborts the whole decode.

use crate::config::CoreConfig;
use crate::content::StoryContent;
use crate::story::{PreviewImage, Story};
use crate::wire::{self, content_prefix, required, ContentWrapper, StoryWire};
use crate::{CoreResult, DecodeError, DecodeResult};
use std::fmt;
use std::sync::Arc;
use story_assets::{
    parse_absolute_url, AssetError, AssetResolver, DirectoryBundle, FsImageLoader, ImageLoader,
    ResourceBundle,
};
use story_types::ContentNature;
use story_uuid::StoryId;

/// Decodes stories from JSON.
///
/// The decoder holds only read-only capabilities and can be shared across threads.
#[derive(Clone)]
pub struct StoryDecoder {
    resolver: AssetResolver,
    images: Arc<dyn ImageLoader>,
}

impl StoryDecoder {
    pub fn new(bundle: Arc<dyn ResourceBundle>, images: Arc<dyn ImageLoader>) -> Self {
        Self {
            resolver: AssetResolver::new(bundle),
            images,
        }
    }

    /// Decoder over the configured resources directory, loading previews from disk.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Asset`] if the resources directory is not usable.
    pub fn from_config(config: &CoreConfig) -> CoreResult<Self> {
        let bundle = DirectoryBundle::new(config.resources_dir())?;
        Ok(Self::new(Arc::new(bundle), Arc::new(FsImageLoader::new())))
    }

    /// Decode one story from JSON bytes.
    pub fn decode_slice(&self, bytes: &[u8]) -> DecodeResult<Story> {
        let wire: StoryWire = wire::from_slice(bytes)?;
        self.build(wire, "")
    }

    /// Decode one story from JSON text.
    pub fn decode_str(&self, json: &str) -> DecodeResult<Story> {
        self.decode_slice(json.as_bytes())
    }

    /// Decode one story from an already parsed JSON value.
    pub fn decode_value(&self, value: serde_json::Value) -> DecodeResult<Story> {
        let wire: StoryWire = wire::from_value(value)?;
        self.build(wire, "")
    }

    /// Decode a JSON array of stories, keeping their order.
    ///
    /// # Errors
    ///
    /// Schema mismatches carry the full path (for example `[1].contents[0].duration`).
    /// Validation failures are wrapped in [`DecodeError::InList`] with the failing index, and
    /// their field paths carry the same `[index].` prefix.
    pub fn decode_stories(&self, bytes: &[u8]) -> DecodeResult<Vec<Story>> {
        let wires: Vec<StoryWire> = wire::from_slice(bytes)?;
        wires
            .into_iter()
            .enumerate()
            .map(|(index, wire)| {
                let prefix = format!("[{index}].");
                self.build(wire, &prefix).map_err(|source| DecodeError::InList {
                    index,
                    source: Box::new(source),
                })
            })
            .collect()
    }

    fn build(&self, wire: StoryWire, prefix: &str) -> DecodeResult<Story> {
        let name = required(wire.name, prefix, "name")?;
        let preview_reference = required(wire.preview_asset, prefix, "previewAsset")?;
        let content_nature = ContentNature::from_wire(wire.content_nature.as_ref());
        let id = wire
            .ident
            .map(StoryId::from_wire)
            .unwrap_or_else(StoryId::generate);

        let preview_image = self.resolve_preview(preview_reference);

        let contents = required(wire.contents, prefix, crate::constants::CONTENTS_KEY)?;
        let mut content = Vec::with_capacity(contents.len());
        for (index, element) in contents.into_iter().enumerate() {
            let element_prefix = content_prefix(prefix, index);
            let wrapper = ContentWrapper::from_wire(element, &element_prefix)?;
            let item = self.build_content(wrapper, &element_prefix)?;
            content.push(item.with_nature(content_nature));
        }

        tracing::debug!(
            story_id = %id,
            nature = %content_nature,
            items = content.len(),
            "decoded story"
        );

        Ok(Story::from_parts(
            id,
            name,
            preview_image,
            content_nature,
            content,
        ))
    }

    fn build_content(&self, wrapper: ContentWrapper, prefix: &str) -> DecodeResult<StoryContent> {
        let asset_reference = self
            .resolver
            .resolve(&wrapper.asset_name)
            .map_err(|e| match e {
                AssetError::NotFound(name) => DecodeError::AssetNotFound {
                    field: wire::field_path(prefix, "assetName"),
                    name,
                },
                other => DecodeError::Asset(other),
            })?;

        Ok(StoryContent::new(
            wrapper.content_type,
            asset_reference,
            wrapper.interaction_url,
            wrapper.duration,
        ))
    }

    fn resolve_preview(&self, reference: String) -> PreviewImage {
        if let Some(url) = parse_absolute_url(&reference) {
            return PreviewImage::remote(reference, url);
        }

        let image = self
            .resolver
            .bundle()
            .lookup(&reference)
            .and_then(|handle| self.images.load_image(&handle));
        if image.is_none() {
            tracing::warn!(preview = %reference, "preview image could not be resolved");
        }
        PreviewImage::local(reference, image)
    }
}

impl fmt::Debug for StoryDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoryDecoder")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}
