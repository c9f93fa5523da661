//! Configuration validation module.
//!
//! Checks a resolved [`CacheConfig`] before any connection is attempted.

use crate::CacheConfig;
use ccs_core::CcsError;
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Cache host is missing or empty.
    MissingHost,
    /// Host does not produce a valid connection URL.
    InvalidUrl { url: String, message: String },
    /// Cache name is empty.
    EmptyCacheName,
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String, value: u64 },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHost => {
                write!(f, "Cache host is required (set CACHING_INTERNAL_CACHE_URL)")
            }
            Self::InvalidUrl { url, message } => {
                write!(f, "Invalid cache URL '{}': {}", url, message)
            }
            Self::EmptyCacheName => write!(f, "Cache name cannot be empty"),
            Self::NonPositiveTimeout { name, value } => {
                write!(f, "Timeout '{}' must be positive, got {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the configuration, folding every problem into one
    /// [`CcsError::Configuration`].
    pub fn ensure_valid(config: &CacheConfig) -> Result<(), CcsError> {
        Self::validate(config).map_err(|errors| {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            CcsError::Configuration(message)
        })
    }

    /// Validates the cache configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &CacheConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if config.host.trim().is_empty() {
            errors.push(ConfigValidationError::MissingHost);
        } else {
            let url = config.connection_url();
            match Url::parse(&url) {
                Ok(parsed) if parsed.host_str().is_some() => {}
                Ok(_) => errors.push(ConfigValidationError::InvalidUrl {
                    url,
                    message: "URL has no host".to_string(),
                }),
                Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                    url,
                    message: e.to_string(),
                }),
            }
        }

        if config.cache_name.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyCacheName);
        }

        if config.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "request_timeout_secs".to_string(),
                value: config.request_timeout_secs,
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Transport;

    #[test]
    fn test_valid_config() {
        let config = CacheConfig::new("cache", Transport::Rest);
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_missing_host() {
        let config = CacheConfig::new("  ", Transport::Rest);
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors, vec![ConfigValidationError::MissingHost]);
    }

    #[test]
    fn test_invalid_host() {
        let config = CacheConfig::new("bad host", Transport::Grpc);
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(errors[0], ConfigValidationError::InvalidUrl { .. }));
    }

    #[test]
    fn test_ensure_valid_joins_messages() {
        let config = CacheConfig::new("cache", Transport::Rest)
            .with_cache_name("")
            .with_request_timeout_secs(0);
        let err = ConfigValidator::ensure_valid(&config).unwrap_err();
        assert!(matches!(err, CcsError::Configuration(ref msg)
            if msg.contains("Cache name cannot be empty") && msg.contains("must be positive")));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = CacheConfig::new("", Transport::Rest)
            .with_cache_name("")
            .with_request_timeout_secs(0);
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ConfigValidationError::EmptyCacheName));
    }

    #[test]
    fn test_error_display() {
        let err = ConfigValidationError::NonPositiveTimeout {
            name: "request_timeout_secs".to_string(),
            value: 0,
        };
        assert_eq!(err.to_string(), "Timeout 'request_timeout_secs' must be positive, got 0");
    }
}
