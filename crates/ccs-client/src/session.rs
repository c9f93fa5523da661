//! Sessions and session providers.

use crate::clients::{GrpcSession, HttpSession};
use crate::{Cache, CacheBackend};
use async_trait::async_trait;
use ccs_config::{CacheConfig, Transport, DEFAULT_REQUEST_TIMEOUT_SECS};
use ccs_core::{CcsError, CcsResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// A connection context to the remote cache, reused for all operations.
pub trait Session: Send + Sync + fmt::Debug {
    /// Human-readable endpoint of this session, for diagnostics.
    fn endpoint(&self) -> &str;

    /// Returns a raw handle to the cache called `name`.
    fn backend(&self, name: &str) -> CcsResult<Arc<dyn CacheBackend>>;
}

/// Typed access to caches on any [`Session`].
pub trait SessionExt: Session {
    /// Returns a typed handle to the cache called `name`.
    fn cache<T>(&self, name: &str) -> CcsResult<Cache<T>>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        Ok(Cache::new(self.backend(name)?))
    }
}

impl<S: Session + ?Sized> SessionExt for S {}

/// Opens sessions for a given transport.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Creates a new session using `transport`.
    async fn create_session(&self, transport: Transport) -> CcsResult<Arc<dyn Session>>;
}

/// Session provider for a remote cache reachable at a fixed URL.
#[derive(Debug, Clone)]
pub struct RemoteSessionProvider {
    url: Url,
    request_timeout: Duration,
}

impl RemoteSessionProvider {
    /// Creates a provider for the cache at `url`.
    pub fn new(url: &str) -> CcsResult<Self> {
        let url = Url::parse(url)
            .map_err(|e| CcsError::Configuration(format!("Invalid cache URL '{}': {}", url, e)))?;
        if url.host_str().is_none() {
            return Err(CcsError::Configuration(format!("Cache URL '{}' has no host", url)));
        }

        Ok(Self {
            url,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        })
    }

    /// Creates a provider from a resolved configuration.
    pub fn from_config(config: &CacheConfig) -> CcsResult<Self> {
        Ok(Self::new(&config.connection_url())?.with_request_timeout(config.request_timeout()))
    }

    /// Sets the per-request timeout applied by the transports.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// URL sessions connect to.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl SessionProvider for RemoteSessionProvider {
    async fn create_session(&self, transport: Transport) -> CcsResult<Arc<dyn Session>> {
        debug!("Creating {} session to {}", transport, self.url);

        let session: Arc<dyn Session> = match transport {
            Transport::Rest => Arc::new(HttpSession::new(self.url.clone(), self.request_timeout)?),
            Transport::Grpc => Arc::new(GrpcSession::connect(&self.url, self.request_timeout).await?),
        };

        info!("{} session established: {}", transport, session.endpoint());
        Ok(session)
    }
}

pub(crate) fn validate_cache_name(name: &str) -> CcsResult<()> {
    if name.trim().is_empty() {
        return Err(CcsError::invalid_argument("Cache name cannot be empty"));
    }
    Ok(())
}
