//! In-process cache session.
//!
//! Same semantics as the remote transports, kept in memory. Useful for tests
//! and for running the service without a cache cluster.

use crate::session::validate_cache_name;
use crate::{CacheBackend, Return, Session, SessionProvider};
use async_trait::async_trait;
use ccs_config::Transport;
use ccs_core::CcsResult;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Session holding named in-memory caches.
#[derive(Debug, Default)]
pub struct LocalSession {
    caches: RwLock<HashMap<String, Arc<LocalCacheBackend>>>,
}

impl LocalSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the concrete backend for `name`, creating it on first use.
    pub fn local_backend(&self, name: &str) -> CcsResult<Arc<LocalCacheBackend>> {
        validate_cache_name(name)?;

        if let Some(cache) = self.caches.read().get(name) {
            return Ok(Arc::clone(cache));
        }

        let mut caches = self.caches.write();
        let cache = caches
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(LocalCacheBackend::new(name)));
        Ok(Arc::clone(cache))
    }
}

impl Session for LocalSession {
    fn endpoint(&self) -> &str {
        "local"
    }

    fn backend(&self, name: &str) -> CcsResult<Arc<dyn CacheBackend>> {
        Ok(self.local_backend(name)?)
    }
}

/// Provider that hands out one shared [`LocalSession`] for any transport.
#[derive(Debug, Clone, Default)]
pub struct LocalSessionProvider {
    session: Arc<LocalSession>,
}

impl LocalSessionProvider {
    /// Creates a provider with a fresh session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared session.
    #[must_use]
    pub fn session(&self) -> Arc<LocalSession> {
        Arc::clone(&self.session)
    }
}

#[async_trait]
impl SessionProvider for LocalSessionProvider {
    async fn create_session(&self, transport: Transport) -> CcsResult<Arc<dyn Session>> {
        debug!("Creating local session (requested transport: {})", transport);
        Ok(self.session())
    }
}

/// One in-memory cache.
#[derive(Debug)]
pub struct LocalCacheBackend {
    name: String,
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl LocalCacheBackend {
    /// Creates an empty cache called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl CacheBackend for LocalCacheBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, key: &str) -> CcsResult<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>, ret: Return) -> CcsResult<Option<Vec<u8>>> {
        let old = self.entries.write().insert(key.to_string(), value);
        Ok(old.filter(|_| ret.wants_old_value()))
    }

    async fn replace(&self, key: &str, value: Vec<u8>) -> CcsResult<Option<Vec<u8>>> {
        let mut entries = self.entries.write();
        Ok(entries
            .get_mut(key)
            .map(|slot| std::mem::replace(slot, value)))
    }

    async fn remove(&self, key: &str, ret: Return) -> CcsResult<Option<Vec<u8>>> {
        let old = self.entries.write().remove(key);
        Ok(old.filter(|_| ret.wants_old_value()))
    }
}
