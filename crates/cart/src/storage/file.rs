use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{KeyValueStorage, StorageError};

/// Directory-backed storage: each key is a JSON file named after the
/// percent-encoded key (`@app:cart` → `%40app%3Acart.json`).
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Store files under `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the key files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", urlencoding::encode(key)))
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::io(key, e))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| StorageError::io(key, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| StorageError::io(key, e))
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for_encodes_key() {
        let storage = FileStorage::new("/tmp/carts");
        assert_eq!(
            storage.path_for("@app:cart"),
            PathBuf::from("/tmp/carts/%40app%3Acart.json")
        );
    }

    #[tokio::test]
    async fn test_round_trip_in_nested_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path().join("nested"));

        assert_eq!(storage.get("@app:cart").await.unwrap(), None);
        storage.set("@app:cart", "[]").await.unwrap();
        assert_eq!(storage.get("@app:cart").await.unwrap().as_deref(), Some("[]"));
        assert!(!storage.path_for("@app:cart").with_extension("json.tmp").exists());

        storage.remove("@app:cart").await.unwrap();
        storage.remove("@app:cart").await.unwrap();
        assert_eq!(storage.get("@app:cart").await.unwrap(), None);
    }
}
