//! gRPC transport for the remote cache.

use crate::proto::{CacheServiceClient, GetRequest, PutRequest, RemoveRequest, ReplaceRequest, ValueResponse};
use crate::session::validate_cache_name;
use crate::{CacheBackend, Return, Session};
use async_trait::async_trait;
use ccs_core::{CcsError, CcsResult};
use std::sync::Arc;
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;
use url::Url;

/// Session over the cache's gRPC API, holding one shared channel.
#[derive(Debug, Clone)]
pub struct GrpcSession {
    client: CacheServiceClient,
    endpoint: String,
}

impl GrpcSession {
    /// Connects to the cache at `url`. Fails if the endpoint is unreachable.
    pub async fn connect(url: &Url, request_timeout: Duration) -> CcsResult<Self> {
        let endpoint = Endpoint::from_shared(url.to_string())
            .map_err(|e| CcsError::Configuration(format!("Invalid gRPC endpoint '{}': {}", url, e)))?
            .timeout(request_timeout)
            .connect_timeout(request_timeout);

        let channel = endpoint
            .connect()
            .await
            .map_err(|e| CcsError::Cache(format!("Failed to connect to cache at {}: {}", url, e)))?;

        Ok(Self::from_channel(channel, url.as_str()))
    }

    /// Creates a session from an existing channel.
    #[must_use]
    pub fn from_channel(channel: Channel, endpoint: &str) -> Self {
        Self {
            client: CacheServiceClient::new(channel),
            endpoint: endpoint.to_string(),
        }
    }
}

impl Session for GrpcSession {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn backend(&self, name: &str) -> CcsResult<Arc<dyn CacheBackend>> {
        validate_cache_name(name)?;
        Ok(Arc::new(GrpcCacheBackend {
            client: self.client.clone(),
            name: name.to_string(),
        }))
    }
}

/// One named cache reached over gRPC.
#[derive(Debug, Clone)]
pub struct GrpcCacheBackend {
    client: CacheServiceClient,
    name: String,
}

#[async_trait]
impl CacheBackend for GrpcCacheBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, key: &str) -> CcsResult<Option<Vec<u8>>> {
        debug!("gRPC Get: {}/{}", self.name, key);

        let result = self
            .client
            .clone()
            .get(GetRequest {
                cache: self.name.clone(),
                key: key.to_string(),
            })
            .await;

        present_value(&self.name, result)
    }

    async fn put(&self, key: &str, value: Vec<u8>, ret: Return) -> CcsResult<Option<Vec<u8>>> {
        debug!("gRPC Put: {}/{}", self.name, key);

        let result = self
            .client
            .clone()
            .put(PutRequest {
                cache: self.name.clone(),
                key: key.to_string(),
                value,
                return_old_value: ret.wants_old_value(),
            })
            .await;

        let old = present_value(&self.name, result)?;
        Ok(if ret.wants_old_value() { old } else { None })
    }

    async fn replace(&self, key: &str, value: Vec<u8>) -> CcsResult<Option<Vec<u8>>> {
        debug!("gRPC Replace: {}/{}", self.name, key);

        let result = self
            .client
            .clone()
            .replace(ReplaceRequest {
                cache: self.name.clone(),
                key: key.to_string(),
                value,
            })
            .await;

        present_value(&self.name, result)
    }

    async fn remove(&self, key: &str, ret: Return) -> CcsResult<Option<Vec<u8>>> {
        debug!("gRPC Remove: {}/{}", self.name, key);

        let result = self
            .client
            .clone()
            .remove(RemoveRequest {
                cache: self.name.clone(),
                key: key.to_string(),
                return_old_value: ret.wants_old_value(),
            })
            .await;

        let old = present_value(&self.name, result)?;
        Ok(if ret.wants_old_value() { old } else { None })
    }
}

/// Maps a response to "value if the key was present".
///
/// `NOT_FOUND` is treated as an absent key, not an error.
fn present_value(
    cache: &str,
    result: Result<tonic::Response<ValueResponse>, tonic::Status>,
) -> CcsResult<Option<Vec<u8>>> {
    match result {
        Ok(response) => {
            let response = response.into_inner();
            Ok(response
                .present
                .then(|| response.value.unwrap_or_default()))
        }
        Err(status) if status.code() == tonic::Code::NotFound => Ok(None),
        Err(status) => Err(map_grpc_error(cache, &status)),
    }
}

fn map_grpc_error(cache: &str, status: &tonic::Status) -> CcsError {
    CcsError::Cache(format!(
        "gRPC error from cache '{}': {:?}: {}",
        cache,
        status.code(),
        status.message()
    ))
}
