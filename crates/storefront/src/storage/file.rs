//! File-backed storage backend.
//!
//! Each key maps to one file inside a profile directory. Writes land in a
//! temporary sibling first and are renamed over the target, so a crash
//! mid-write leaves the previous value intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Storage, StorageError, validate_key};

const TEMP_SUFFIX: &str = ".tmp";

/// Stores each key as `<dir>/<key>` on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a store rooted at `dir`. The directory is created on first
    /// write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The profile directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }
}

fn io_error(key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_owned(),
        source,
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| io_error(key, e))?;

        let temp = self.dir.join(format!("{key}{TEMP_SUFFIX}"));
        fs::write(&temp, value).map_err(|e| io_error(key, e))?;
        fs::rename(&temp, &path).map_err(|e| io_error(key, e))?;

        debug!(key, bytes = value.len(), path = %path.display(), "Wrote storage item");
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get_item("shopping-cart").unwrap(), None);
    }

    #[test]
    fn test_write_creates_directory_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join("profile");
        let mut storage = FileStorage::new(&profile);

        storage.set_item("shopping-cart", "[1]").unwrap();
        storage.set_item("shopping-cart", "[2]").unwrap();

        let reopened = FileStorage::new(&profile);
        assert_eq!(
            reopened.get_item("shopping-cart").unwrap().as_deref(),
            Some("[2]")
        );
        assert!(!profile.join("shopping-cart.tmp").exists());
    }

    #[test]
    fn test_remove_item() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());

        storage.set_item("shopping-cart", "[]").unwrap();
        storage.remove_item("shopping-cart").unwrap();
        storage.remove_item("shopping-cart").unwrap();

        assert_eq!(storage.get_item("shopping-cart").unwrap(), None);
    }

    #[test]
    fn test_path_traversal_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        assert!(matches!(
            storage.set_item("../outside", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be cannot be read as a string.
        fs::create_dir(dir.path().join("shopping-cart")).unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(matches!(
            storage.get_item("shopping-cart"),
            Err(StorageError::Io { .. })
        ));
    }
}
