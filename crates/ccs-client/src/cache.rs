//! Typed cache handle over a raw backend.

use crate::{CacheBackend, Return};
use ccs_core::CcsResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Typed handle to a named remote cache.
///
/// Values are stored as JSON. Handles are cheap to clone and share one
/// backend.
pub struct Cache<T> {
    backend: Arc<dyn CacheBackend>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Cache<T> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Cache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("name", &self.backend.name())
            .finish_non_exhaustive()
    }
}

impl<T> Cache<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    /// Wraps a raw backend.
    #[must_use]
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend,
            _marker: PhantomData,
        }
    }

    /// Name of the underlying cache.
    #[must_use]
    pub fn name(&self) -> &str {
        self.backend.name()
    }

    /// Returns the value stored under `key`, if any.
    pub async fn get(&self, key: &str) -> CcsResult<Option<T>> {
        decode(self.backend.get(key).await?)
    }

    /// Stores `value` under `key`, overwriting any existing entry.
    pub async fn put(&self, key: &str, value: &T) -> CcsResult<()> {
        self.backend.put(key, encode(value)?, Return::Nothing).await?;
        Ok(())
    }

    /// Stores `value` under `key` and returns the displaced value if asked to.
    pub async fn put_returning(&self, key: &str, value: &T, ret: Return) -> CcsResult<Option<T>> {
        decode(self.backend.put(key, encode(value)?, ret).await?)
    }

    /// Replaces the entry under `key` if one exists.
    ///
    /// Returns `true` when an entry was replaced.
    pub async fn replace(&self, key: &str, value: &T) -> CcsResult<bool> {
        Ok(self.backend.replace(key, encode(value)?).await?.is_some())
    }

    /// Removes the entry under `key`.
    pub async fn remove(&self, key: &str, ret: Return) -> CcsResult<Option<T>> {
        decode(self.backend.remove(key, ret).await?)
    }
}

fn encode<T: Serialize>(value: &T) -> CcsResult<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

fn decode<T: DeserializeOwned>(bytes: Option<Vec<u8>>) -> CcsResult<Option<T>> {
    match bytes {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocalCacheBackend;
    use ccs_core::CcsError;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        label: String,
    }

    fn item(label: &str) -> Item {
        Item {
            label: label.to_string(),
        }
    }

    fn cache() -> (Arc<LocalCacheBackend>, Cache<Item>) {
        let backend = Arc::new(LocalCacheBackend::new("items"));
        let cache = Cache::new(backend.clone() as Arc<dyn CacheBackend>);
        (backend, cache)
    }

    #[tokio::test]
    async fn test_put_get_remove() {
        let (_, cache) = cache();
        assert_eq!(cache.name(), "items");
        assert!(cache.get("a").await.unwrap().is_none());

        cache.put("a", &item("one")).await.unwrap();
        assert_eq!(cache.get("a").await.unwrap(), Some(item("one")));

        let removed = cache.remove("a", Return::OldValue).await.unwrap();
        assert_eq!(removed, Some(item("one")));
        assert!(cache.get("a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_returning_old_value() {
        let (_, cache) = cache();
        assert!(cache.put_returning("a", &item("one"), Return::OldValue).await.unwrap().is_none());
        let old = cache.put_returning("a", &item("two"), Return::OldValue).await.unwrap();
        assert_eq!(old, Some(item("one")));
        let none = cache.put_returning("a", &item("three"), Return::Nothing).await.unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_replace_requires_existing_entry() {
        let (_, cache) = cache();
        assert!(!cache.replace("a", &item("one")).await.unwrap());
        assert!(cache.get("a").await.unwrap().is_none());

        cache.put("a", &item("one")).await.unwrap();
        assert!(cache.replace("a", &item("two")).await.unwrap());
        assert_eq!(cache.get("a").await.unwrap(), Some(item("two")));
    }

    #[tokio::test]
    async fn test_undecodable_value_is_serialization_error() {
        let (backend, cache) = cache();
        backend.put("a", b"not json".to_vec(), Return::Nothing).await.unwrap();
        let err = cache.get("a").await.unwrap_err();
        assert!(matches!(err, CcsError::Serialization(_)));
    }

    #[test]
    fn test_debug_shows_name() {
        let (_, cache) = cache();
        assert!(format!("{cache:?}").contains("items"));
    }
}
