//! Transport selection for the remote cache.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Wire protocol used to reach the remote cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// HTTP/REST protocol.
    #[default]
    Rest,
    /// gRPC protocol.
    Grpc,
}

impl Transport {
    /// Port the cache listens on for this transport.
    #[must_use]
    pub const fn port(&self) -> u16 {
        match self {
            Self::Rest => 8080,
            Self::Grpc => 1444,
        }
    }

    /// Path suffix appended to the connection URL.
    #[must_use]
    pub const fn url_suffix(&self) -> &'static str {
        match self {
            Self::Rest => "ccs",
            Self::Grpc => "",
        }
    }

    /// Resolves an optional protocol name, defaulting to REST.
    ///
    /// Unknown names fall back to REST with a warning.
    #[must_use]
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            None => Self::default(),
            Some(name) => name.parse().unwrap_or_else(|_| {
                warn!("Unknown cache protocol '{}', falling back to REST", name);
                Self::default()
            }),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rest => write!(f, "REST"),
            Self::Grpc => write!(f, "GRPC"),
        }
    }
}

/// Error returned when a protocol name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTransport(pub String);

impl fmt::Display for UnknownTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown transport '{}' (expected REST or GRPC)", self.0)
    }
}

impl std::error::Error for UnknownTransport {}

impl FromStr for Transport {
    type Err = UnknownTransport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "REST" => Ok(Self::Rest),
            "GRPC" => Ok(Self::Grpc),
            _ => Err(UnknownTransport(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ports_and_suffixes() {
        assert_eq!(Transport::Rest.port(), 8080);
        assert_eq!(Transport::Rest.url_suffix(), "ccs");
        assert_eq!(Transport::Grpc.port(), 1444);
        assert_eq!(Transport::Grpc.url_suffix(), "");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("grpc".parse::<Transport>().unwrap(), Transport::Grpc);
        assert_eq!("GRPC".parse::<Transport>().unwrap(), Transport::Grpc);
        assert_eq!("Rest".parse::<Transport>().unwrap(), Transport::Rest);
        assert!("soap".parse::<Transport>().is_err());
    }

    #[test]
    fn test_resolve_defaults_to_rest() {
        assert_eq!(Transport::resolve(None), Transport::Rest);
        assert_eq!(Transport::resolve(Some("carrier-pigeon")), Transport::Rest);
        assert_eq!(Transport::resolve(Some("gRPC")), Transport::Grpc);
    }

    #[test]
    fn test_display() {
        assert_eq!(Transport::Rest.to_string(), "REST");
        assert_eq!(Transport::Grpc.to_string(), "GRPC");
    }
}
