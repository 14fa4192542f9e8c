//! # Story Core
//!
//! Core model and decoding for stories: named, ordered collections of ephemeral media items
//! shown full-screen in sequence.
//!
//! This crate contains:
//! - The [`Story`] aggregate and its [`StoryContent`] variants
//! - Decoding from the JSON wire format ([`StoryDecoder`], [`decode_wrapper`])
//! - Persistent seen-state tracking with change notification ([`SeenStateTracker`])
//!
//! **No presentation concerns**: rendering, gestures and network fetching of remote assets
//! belong to consumers of this crate. Persistence and event delivery are injected through
//! [`FlagStore`] and [`EventPublisher`].
//!
//! ## Wire format
//!
//! ```json
//! {
//!   "name": "Summer",
//!   "previewAsset": "summer-cover.png",
//!   "contentNature": 1,
//!   "ident": "E621E1F8-C36C-495A-93FC-0C247A3E6E5F",
//!   "contents": [
//!     { "contentType": "image", "assetName": "https://cdn.example.com/1.png", "duration": 5 },
//!     { "contentType": "video", "assetName": "intro.mp4",
//!       "interactionUrl": "https://example.com/shop", "duration": 12 }
//!   ]
//! }
//! ```

pub mod config;
pub mod constants;
mod content;
mod decoder;
mod error;
pub mod seen;
mod story;
mod wire;

pub use config::CoreConfig;
pub use content::{ContentItem, StoryContent};
pub use decoder::StoryDecoder;
pub use error::{CoreError, CoreResult, DecodeError, DecodeResult, SeenError, SeenResult};
pub use seen::{
    BroadcastEventBus, EventPublisher, FlagStore, InMemoryFlagStore, JsonFileFlagStore,
    SeenStateTracker, StoryEvent,
};
pub use story::{PreviewImage, Story};
pub use wire::{decode_wrapper, ContentWrapper};

// Re-export the primitives that appear in this crate's public API.
pub use story_assets::{AssetReference, Image, ResourceHandle, Url};
pub use story_types::{ContentKind, ContentNature};
pub use story_uuid::{ContentId, StoryId};
