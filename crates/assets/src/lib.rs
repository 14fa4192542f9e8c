//! Story asset resolution.
//!
//! Content items and story previews name their media with a raw string. That string is either
//! an absolute URL (the asset lives on a remote server) or the name of a resource bundled with
//! the application. This crate turns raw strings into [`AssetReference`]s and defines the two
//! capabilities the resolution depends on:
//!
//! - [`ResourceBundle`]: look up a bundled resource by name
//! - [`ImageLoader`]: load a displayable image from a bundled resource
//!
//! No network access happens here. URL validity is a syntactic check only.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use story_assets::{AssetReference, AssetResolver, DirectoryBundle};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bundle = DirectoryBundle::new(std::path::Path::new("resources"))?;
//! let resolver = AssetResolver::new(Arc::new(bundle));
//!
//! match resolver.resolve("https://cdn.example.com/a.png")? {
//!     AssetReference::Remote(url) => println!("remote {url}"),
//!     AssetReference::Local(handle) => println!("local {}", handle.name()),
//! }
//! # Ok(())
//! # }
//! ```

mod bundle;
mod image;
mod reference;

pub use bundle::{DirectoryBundle, InMemoryBundle, ResourceBundle, ResourceHandle};
pub use image::{FsImageLoader, Image, ImageLoader};
pub use reference::{parse_absolute_url, parse_link, AssetReference, AssetResolver};
pub use url::Url;

/// Errors that can occur while resolving assets
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// Raw asset string is neither an absolute URL nor a bundled resource
    #[error("asset not found: {0}")]
    NotFound(String),

    /// Bundle root directory does not exist or is not a directory
    #[error("Invalid root directory: {0}")]
    InvalidRootDirectory(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for asset operations.
pub type AssetResult<T> = Result<T, AssetError>;
