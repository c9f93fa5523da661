//! Cache connection configuration.

use crate::Transport;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Name of the cache holding user records.
pub const DEFAULT_CACHE_NAME: &str = "users";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Resolved settings for connecting to the remote cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache host name or address (no scheme, no port).
    pub host: String,
    /// Transport used to reach the cache.
    #[serde(default)]
    pub transport: Transport,
    /// Name of the cache holding user records.
    #[serde(default = "default_cache_name")]
    pub cache_name: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_cache_name() -> String {
    DEFAULT_CACHE_NAME.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl CacheConfig {
    /// Creates a configuration for `host` using defaults for everything else.
    #[must_use]
    pub fn new(host: impl Into<String>, transport: Transport) -> Self {
        Self {
            host: host.into(),
            transport,
            cache_name: default_cache_name(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Sets the cache name.
    #[must_use]
    pub fn with_cache_name(mut self, cache_name: impl Into<String>) -> Self {
        self.cache_name = cache_name.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Returns the URL of the cache endpoint: `http://<host>:<port>/<suffix>`.
    #[must_use]
    pub fn connection_url(&self) -> String {
        format!(
            "http://{}:{}/{}",
            self.host,
            self.transport.port(),
            self.transport.url_suffix()
        )
    }

    /// Returns the request timeout as a Duration.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_connection_url() {
        let config = CacheConfig::new("cache.internal", Transport::Rest);
        assert_eq!(config.connection_url(), "http://cache.internal:8080/ccs");
    }

    #[test]
    fn test_grpc_connection_url() {
        let config = CacheConfig::new("10.0.0.7", Transport::Grpc);
        assert_eq!(config.connection_url(), "http://10.0.0.7:1444/");
    }

    #[test]
    fn test_defaults() {
        let config = CacheConfig::new("h", Transport::default());
        assert_eq!(config.transport, Transport::Rest);
        assert_eq!(config.cache_name, "users");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_builders() {
        let config = CacheConfig::new("h", Transport::Grpc)
            .with_cache_name("people")
            .with_request_timeout_secs(5);
        assert_eq!(config.cache_name, "people");
        assert_eq!(config.request_timeout_secs, 5);
    }
}
