//! Persisted boolean flags.
//!
//! The tracker only needs `get` and `set` on string keys. Storage mechanics stay behind the
//! [`FlagStore`] trait so tests can inject [`InMemoryFlagStore`] and binaries can use
//! [`JsonFileFlagStore`].

use crate::{SeenError, SeenResult};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Persisted flag capability.
pub trait FlagStore: Send + Sync {
    /// Returns the stored flag, or `false` when the key was never set.
    fn get(&self, key: &str) -> bool;

    /// Persists `value` under `key`.
    fn set(&self, key: &str, value: bool) -> SeenResult<()>;
}

/// Flags held in process memory only.
#[derive(Debug, Default)]
pub struct InMemoryFlagStore {
    flags: Mutex<HashMap<String, bool>>,
}

impl InMemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for InMemoryFlagStore {
    fn get(&self, key: &str) -> bool {
        let flags = self.flags.lock().unwrap_or_else(PoisonError::into_inner);
        flags.get(key).copied().unwrap_or(false)
    }

    fn set(&self, key: &str, value: bool) -> SeenResult<()> {
        let mut flags = self.flags.lock().unwrap_or_else(PoisonError::into_inner);
        flags.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Flags persisted as a JSON object in a single file.
///
/// The file is read once at open time and rewritten on every `set`. Writes go to a sibling
/// temporary file that is then renamed over the original, so a crash never leaves a torn file.
#[derive(Debug)]
pub struct JsonFileFlagStore {
    path: PathBuf,
    flags: Mutex<BTreeMap<String, bool>>,
}

impl JsonFileFlagStore {
    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`SeenError::StoreRead`] if the file exists but cannot be read, and
    /// [`SeenError::Deserialization`] if it is not a JSON object of booleans.
    pub fn open(path: impl Into<PathBuf>) -> SeenResult<Self> {
        let path = path.into();
        let flags = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(SeenError::Deserialization)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(SeenError::StoreRead(e)),
        };

        Ok(Self {
            path,
            flags: Mutex::new(flags),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, flags: &BTreeMap<String, bool>) -> SeenResult<()> {
        let json = serde_json::to_vec_pretty(flags).map_err(SeenError::Serialization)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(SeenError::StoreWrite)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json).map_err(SeenError::StoreWrite)?;
        fs::rename(&tmp, &self.path).map_err(SeenError::StoreWrite)
    }
}

impl FlagStore for JsonFileFlagStore {
    fn get(&self, key: &str) -> bool {
        let flags = self.flags.lock().unwrap_or_else(PoisonError::into_inner);
        flags.get(key).copied().unwrap_or(false)
    }

    fn set(&self, key: &str, value: bool) -> SeenResult<()> {
        let mut flags = self.flags.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = flags.insert(key.to_owned(), value);

        if let Err(e) = self.persist(&flags) {
            match previous {
                Some(old) => flags.insert(key.to_owned(), old),
                None => flags.remove(key),
            };
            tracing::warn!(path = %self.path.display(), "failed to persist seen flags: {}", e);
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn in_memory_defaults_to_false() {
        let store = InMemoryFlagStore::new();
        assert!(!store.get("isStorySeen_a"));
        store.set("isStorySeen_a", true).unwrap();
        assert!(store.get("isStorySeen_a"));
        assert!(!store.get("isStorySeen_b"));
    }

    #[test]
    fn json_file_survives_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state/seen.json");

        let store = JsonFileFlagStore::open(&path).expect("missing file is empty store");
        assert!(!store.get("isStorySeen_a"));
        store.set("isStorySeen_a", true).expect("persisted");
        drop(store);

        let reopened = JsonFileFlagStore::open(&path).expect("reopen");
        assert!(reopened.get("isStorySeen_a"));
        assert!(!reopened.get("isStorySeen_b"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn json_file_rejects_malformed_contents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("seen.json");
        fs::write(&path, b"[1, 2, 3]").unwrap();

        let err = JsonFileFlagStore::open(&path).expect_err("not an object of booleans");
        assert!(matches!(err, SeenError::Deserialization(_)));
    }

    #[test]
    fn json_file_rolls_back_on_write_failure() {
        let temp = TempDir::new().unwrap();
        // A directory at the target path makes the final rename fail.
        let path = temp.path().join("seen.json");
        fs::create_dir_all(path.join("occupied")).unwrap();
        let store = JsonFileFlagStore {
            path: path.clone(),
            flags: Mutex::new(BTreeMap::new()),
        };

        let err = store.set("isStorySeen_a", true).expect_err("rename over directory");
        assert!(matches!(err, SeenError::StoreWrite(_)));
        assert!(!store.get("isStorySeen_a"));
    }
}
