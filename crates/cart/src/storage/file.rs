//! File-backed storage adapter.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{CartSnapshot, CartStorage, STORAGE_KEY, persisted};
use crate::error::StorageError;

/// Stores the envelope as `<dir>/<key>.json`.
///
/// Writes go to `<key>.json.tmp` and are renamed over the target, so a crash
/// mid-write leaves the previous cart intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    key: String,
}

impl FileStorage {
    /// Storage under the default [`STORAGE_KEY`] in `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_key(dir, STORAGE_KEY)
    }

    /// Storage under a custom namespace key in `dir`.
    #[must_use]
    pub fn with_key(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    /// Path of the persisted file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    /// Directory holding the persisted file.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl CartStorage for FileStorage {
    fn load(&self) -> Result<Option<CartSnapshot>, StorageError> {
        match fs::read_to_string(self.path()) {
            Ok(raw) => persisted::decode(&raw).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StorageError> {
        let raw = persisted::encode(snapshot)?;
        fs::create_dir_all(&self.dir)?;

        let target = self.path();
        let tmp = self.dir.join(format!("{}.json.tmp", self.key));
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &target)?;

        tracing::trace!(path = %target.display(), "Persisted cart");
        Ok(())
    }
}
