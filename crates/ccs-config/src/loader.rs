//! Configuration loader with layered sources.

use crate::{CacheConfig, ConfigValidator, Transport, DEFAULT_CACHE_NAME, DEFAULT_REQUEST_TIMEOUT_SECS};
use ccs_core::CcsError;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Prefix of the environment variables read by the loader.
pub const ENV_PREFIX: &str = "CACHING";

/// Settings as they appear in the sources, before defaults and validation.
///
/// Keys match the environment variables with the `CACHING_` prefix stripped
/// and lowercased, e.g. `CACHING_INTERNAL_CACHE_URL` -> `internal_cache_url`.
#[derive(Debug, Default, Deserialize)]
struct RawCacheSettings {
    #[serde(default)]
    internal_cache_url: Option<String>,
    #[serde(default)]
    protocol: Option<String>,
    #[serde(default)]
    cache_name: Option<String>,
    #[serde(default)]
    request_timeout_secs: Option<u64>,
}

/// Builds a [`CacheConfig`] from layered sources.
///
/// Sources are applied in order, later ones overriding earlier ones:
/// 1. an optional TOML/JSON/YAML file (`with_file`)
/// 2. environment variables with the `CACHING_` prefix
///
/// A `.env` file in the working directory is loaded first when the process
/// environment is used.
#[derive(Debug, Default)]
pub struct CacheConfigLoader {
    file: Option<PathBuf>,
    env_override: Option<config::Map<String, String>>,
}

impl CacheConfigLoader {
    /// Creates a loader reading only the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a configuration file as the lowest-priority source.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Reads variables from `vars` instead of the process environment.
    #[must_use]
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_override = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Loads and validates the configuration.
    pub fn load(self) -> Result<CacheConfig, CcsError> {
        if self.env_override.is_none() {
            if let Err(e) = dotenvy::dotenv() {
                debug!("No .env file found or error loading it: {}", e);
            }
        }

        let mut builder = Config::builder();

        if let Some(path) = &self.file {
            debug!("Loading cache config from: {}", path.display());
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(self.env_override),
        );

        let raw: RawCacheSettings = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_ccs_error)?;

        let config = CacheConfig {
            host: raw.internal_cache_url.unwrap_or_default(),
            transport: Transport::resolve(raw.protocol.as_deref()),
            cache_name: raw
                .cache_name
                .unwrap_or_else(|| DEFAULT_CACHE_NAME.to_string()),
            request_timeout_secs: raw
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        ConfigValidator::ensure_valid(&config)?;

        info!(
            host = %config.host,
            transport = %config.transport,
            cache = %config.cache_name,
            "Cache configuration loaded"
        );

        Ok(config)
    }
}

/// Loads the configuration from the process environment.
pub fn load_from_env() -> Result<CacheConfig, CcsError> {
    CacheConfigLoader::new().load()
}

fn config_error_to_ccs_error(err: ConfigError) -> CcsError {
    CcsError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_env_vars_rest_default() {
        let config = CacheConfigLoader::new()
            .with_env_vars([("CACHING_INTERNAL_CACHE_URL", "cache-host")])
            .load()
            .unwrap();
        assert_eq!(config.host, "cache-host");
        assert_eq!(config.transport, Transport::Rest);
        assert_eq!(config.cache_name, "users");
        assert_eq!(config.connection_url(), "http://cache-host:8080/ccs");
    }

    #[test]
    fn test_env_vars_grpc() {
        let config = CacheConfigLoader::new()
            .with_env_vars([
                ("CACHING_INTERNAL_CACHE_URL", "cache-host"),
                ("CACHING_PROTOCOL", "grpc"),
            ])
            .load()
            .unwrap();
        assert_eq!(config.transport, Transport::Grpc);
        assert_eq!(config.connection_url(), "http://cache-host:1444/");
    }

    #[test]
    fn test_unknown_protocol_falls_back_to_rest() {
        let config = CacheConfigLoader::new()
            .with_env_vars([
                ("CACHING_INTERNAL_CACHE_URL", "cache-host"),
                ("CACHING_PROTOCOL", "memcached"),
            ])
            .load()
            .unwrap();
        assert_eq!(config.transport, Transport::Rest);
    }

    #[test]
    fn test_missing_host_is_an_error() {
        let err = CacheConfigLoader::new()
            .with_env_vars([("CACHING_PROTOCOL", "REST")])
            .load()
            .unwrap_err();
        assert!(matches!(err, CcsError::Configuration(ref msg) if msg.contains("CACHING_INTERNAL_CACHE_URL")));
    }

    #[test]
    fn test_unrelated_vars_are_ignored() {
        let config = CacheConfigLoader::new()
            .with_env_vars([
                ("CACHING_INTERNAL_CACHE_URL", "h"),
                ("OTHER_PROTOCOL", "grpc"),
            ])
            .load()
            .unwrap();
        assert_eq!(config.transport, Transport::Rest);
    }

    #[test]
    fn test_file_then_env_override() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "internal_cache_url = \"file-host\"\nprotocol = \"GRPC\"\ncache_name = \"people\"\nrequest_timeout_secs = 5"
        )
        .unwrap();

        let config = CacheConfigLoader::new()
            .with_file(file.path())
            .with_env_vars([("CACHING_INTERNAL_CACHE_URL", "env-host")])
            .load()
            .unwrap();

        assert_eq!(config.host, "env-host");
        assert_eq!(config.transport, Transport::Grpc);
        assert_eq!(config.cache_name, "people");
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn test_timeout_from_env_string() {
        let config = CacheConfigLoader::new()
            .with_env_vars([
                ("CACHING_INTERNAL_CACHE_URL", "h"),
                ("CACHING_REQUEST_TIMEOUT_SECS", "12"),
            ])
            .load()
            .unwrap();
        assert_eq!(config.request_timeout_secs, 12);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = CacheConfigLoader::new()
            .with_file("/nonexistent/ccs-users.toml")
            .with_env_vars([("CACHING_INTERNAL_CACHE_URL", "h")])
            .load()
            .unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
