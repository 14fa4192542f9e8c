//! Bundled-resource lookup.
//!
//! A bundle is the namespace of resources shipped with the application. Lookup is by exact
//! resource name including its extension (for example `intro.mp4`). The lookup is read-only and
//! never creates anything on disk.
//!
//! Two implementations are provided:
//! - [`DirectoryBundle`]: resources are files below a root directory
//! - [`InMemoryBundle`]: a fixed set of names, for tests and programmatic assembly

use crate::{AssetError, AssetResult};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// A resource found in a bundle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceHandle {
    name: String,
    location: PathBuf,
}

impl ResourceHandle {
    pub fn new(name: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }

    /// Resource name as it was looked up.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the resource lives. For in-memory bundles this is the bare name.
    pub fn location(&self) -> &Path {
        &self.location
    }
}

/// Lookup capability over the bundled-resource namespace.
pub trait ResourceBundle: Send + Sync {
    /// Returns a handle when `name` exists in the bundle.
    fn lookup(&self, name: &str) -> Option<ResourceHandle>;
}

/// Resources stored as files below a root directory.
///
/// # Security Model
///
/// - The root is canonicalised at construction
/// - Names that are empty, absolute, or contain `..` are never found
/// - Only regular files resolve; directories do not
/// - Candidates are canonicalised and must stay below the root, so symlinks cannot escape it
#[derive(Debug)]
pub struct DirectoryBundle {
    root_directory: PathBuf,
}

impl DirectoryBundle {
    /// Creates a bundle rooted at `root_directory`.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::InvalidRootDirectory`] if the root does not exist, is not a
    /// directory, or cannot be canonicalised.
    pub fn new(root_directory: &Path) -> AssetResult<Self> {
        if !root_directory.exists() {
            return Err(AssetError::InvalidRootDirectory(format!(
                "Directory does not exist: {}",
                root_directory.display()
            )));
        }

        if !root_directory.is_dir() {
            return Err(AssetError::InvalidRootDirectory(format!(
                "Path is not a directory: {}",
                root_directory.display()
            )));
        }

        let root_directory = root_directory.canonicalize().map_err(|e| {
            AssetError::InvalidRootDirectory(format!(
                "Cannot canonicalize path {}: {}",
                root_directory.display(),
                e
            ))
        })?;

        Ok(Self { root_directory })
    }

    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }

    fn is_safe_name(name: &str) -> bool {
        !name.trim().is_empty()
            && Path::new(name)
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    }
}

impl ResourceBundle for DirectoryBundle {
    fn lookup(&self, name: &str) -> Option<ResourceHandle> {
        if !Self::is_safe_name(name) {
            return None;
        }

        // Canonicalize to resolve symlinks before the containment check.
        let candidate = self.root_directory.join(name).canonicalize().ok()?;
        if !candidate.starts_with(&self.root_directory) {
            tracing::warn!(name, "resource resolves outside the bundle root");
            return None;
        }

        if candidate.is_file() {
            Some(ResourceHandle::new(name, candidate))
        } else {
            None
        }
    }
}

/// Fixed set of resource names held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryBundle {
    names: HashSet<String>,
}

impl InMemoryBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resources<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }
}

impl ResourceBundle for InMemoryBundle {
    fn lookup(&self, name: &str) -> Option<ResourceHandle> {
        self.names
            .get(name)
            .map(|found| ResourceHandle::new(found.clone(), found.as_str()))
    }
}
