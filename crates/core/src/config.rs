//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. The library never reads environment variables itself; binaries
//! resolve them and hand the result to [`CoreConfig::new`].

use crate::constants::{DEFAULT_RESOURCES_DIR, DEFAULT_SEEN_STORE_FILENAME, SEEN_KEY_PREFIX};
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};
use story_types::NonEmptyText;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    resources_dir: PathBuf,
    seen_store_path: PathBuf,
    seen_key_prefix: NonEmptyText,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if `seen_key_prefix` is blank.
    pub fn new(
        resources_dir: PathBuf,
        seen_store_path: PathBuf,
        seen_key_prefix: &str,
    ) -> CoreResult<Self> {
        let seen_key_prefix = NonEmptyText::new(seen_key_prefix)
            .map_err(|_| CoreError::InvalidInput("seen_key_prefix cannot be empty".into()))?;

        Ok(Self {
            resources_dir,
            seen_store_path,
            seen_key_prefix,
        })
    }

    /// Configuration with the default key prefix.
    pub fn with_defaults(resources_dir: PathBuf, seen_store_path: PathBuf) -> CoreResult<Self> {
        Self::new(resources_dir, seen_store_path, SEEN_KEY_PREFIX)
    }

    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    pub fn seen_store_path(&self) -> &Path {
        &self.seen_store_path
    }

    pub fn seen_key_prefix(&self) -> &NonEmptyText {
        &self.seen_key_prefix
    }
}

/// Resolve the bundled resources directory without reading environment variables.
///
/// If `override_dir` is provided it must be an existing directory. Otherwise
/// `resources/` relative to the current working directory is used when it exists.
pub fn resolve_resources_dir(override_dir: Option<PathBuf>) -> CoreResult<PathBuf> {
    if let Some(dir) = override_dir {
        if dir.is_dir() {
            return Ok(dir);
        }
        return Err(CoreError::InvalidInput(format!(
            "resources directory override is not a directory: {}",
            dir.display()
        )));
    }

    let cwd_relative = PathBuf::from(DEFAULT_RESOURCES_DIR);
    if cwd_relative.is_dir() {
        return Ok(cwd_relative);
    }

    Err(CoreError::InvalidInput(
        "could not locate resources/ directory".into(),
    ))
}

/// Resolve the seen-state store path, falling back to the default filename.
///
/// Blank values are treated as absent.
pub fn seen_store_path_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SEEN_STORE_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_rejects_blank_prefix() {
        let err = CoreConfig::new("r".into(), "s.json".into(), "  ").expect_err("blank prefix");
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("seen_key_prefix")));
    }

    #[test]
    fn test_with_defaults_uses_standard_prefix() {
        let config =
            CoreConfig::with_defaults("r".into(), "s.json".into()).expect("default prefix");
        assert_eq!(config.seen_key_prefix().as_str(), "isStorySeen_");
        assert_eq!(config.resources_dir(), Path::new("r"));
        assert_eq!(config.seen_store_path(), Path::new("s.json"));
    }

    #[test]
    fn test_resolve_resources_dir_override() {
        let temp = TempDir::new().unwrap();
        let resolved = resolve_resources_dir(Some(temp.path().to_path_buf())).expect("valid dir");
        assert_eq!(resolved, temp.path());

        let missing = temp.path().join("missing");
        let err = resolve_resources_dir(Some(missing)).expect_err("missing dir");
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("not a directory")));
    }

    #[test]
    fn test_seen_store_path_from_env_value() {
        assert_eq!(
            seen_store_path_from_env_value(None),
            PathBuf::from(".story-seen.json")
        );
        assert_eq!(
            seen_store_path_from_env_value(Some("   ".into())),
            PathBuf::from(".story-seen.json")
        );
        assert_eq!(
            seen_store_path_from_env_value(Some(" /tmp/seen.json ".into())),
            PathBuf::from("/tmp/seen.json")
        );
    }
}
