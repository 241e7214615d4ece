use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KeyValueStorage, StorageError};

/// In-process storage. Contents are lost when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").await.unwrap(), None);

        storage.set("k", "v1").await.unwrap();
        storage.set("k", "v2").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v2"));

        storage.remove("k").await.unwrap();
        storage.remove("k").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_with_entries() {
        let storage = MemoryStorage::with_entries([("@app:cart", "[]")]);
        assert_eq!(storage.get("@app:cart").await.unwrap().as_deref(), Some("[]"));
    }
}
