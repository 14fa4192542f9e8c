//! Image loading from bundled resources.

use crate::ResourceHandle;
use std::fs;
use story_types::NonEmptyText;

/// A displayable image loaded from a bundled resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    handle: ResourceHandle,
    media_type: NonEmptyText,
    bytes: Vec<u8>,
}

impl Image {
    pub fn new(handle: ResourceHandle, media_type: NonEmptyText, bytes: Vec<u8>) -> Self {
        Self {
            handle,
            media_type,
            bytes,
        }
    }

    pub fn handle(&self) -> &ResourceHandle {
        &self.handle
    }

    /// Detected MIME type, for example `image/png`.
    pub fn media_type(&self) -> &str {
        self.media_type.as_str()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Capability that turns a bundled resource into an image.
pub trait ImageLoader: Send + Sync {
    /// Returns `None` when the resource cannot be read or is not an image.
    fn load_image(&self, handle: &ResourceHandle) -> Option<Image>;
}

/// Reads image files from disk.
///
/// Media type detection is best-effort and based on the file's leading bytes, not its
/// extension. Files that do not sniff as an image are rejected.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsImageLoader;

impl FsImageLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ImageLoader for FsImageLoader {
    fn load_image(&self, handle: &ResourceHandle) -> Option<Image> {
        let bytes = match fs::read(handle.location()) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(
                    resource = handle.name(),
                    "failed to read image resource: {}",
                    e
                );
                return None;
            }
        };

        let kind = infer::get(&bytes).filter(|kind| kind.matcher_type() == infer::MatcherType::Image);
        let Some(kind) = kind else {
            tracing::warn!(resource = handle.name(), "resource is not a recognised image");
            return None;
        };

        let media_type = NonEmptyText::new(kind.mime_type()).ok()?;
        Some(Image::new(handle.clone(), media_type, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // Minimal PNG signature plus IHDR chunk header, enough for magic-byte detection.
    const PNG_BYTES: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52,
    ];

    #[test]
    fn test_loads_png() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("p.png");
        fs::write(&path, PNG_BYTES).unwrap();

        let image = FsImageLoader::new()
            .load_image(&ResourceHandle::new("p.png", &path))
            .expect("png loads");
        assert_eq!(image.media_type(), "image/png");
        assert_eq!(image.bytes(), PNG_BYTES);
        assert_eq!(image.handle().name(), "p.png");
    }

    #[test]
    fn test_rejects_non_image() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.png");
        fs::write(&path, b"plain text pretending to be a png").unwrap();

        assert!(FsImageLoader::new()
            .load_image(&ResourceHandle::new("notes.png", &path))
            .is_none());
    }

    #[test]
    fn test_missing_file_is_none() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.png");

        assert!(FsImageLoader::new()
            .load_image(&ResourceHandle::new("missing.png", &path))
            .is_none());
    }
}
