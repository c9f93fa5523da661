//! Transport implementations of [`Session`](crate::Session) and
//! [`CacheBackend`](crate::CacheBackend).
//!
//! | Transport | Default port | URL suffix | Payload |
//! |-----------|--------------|------------|---------|
//! | REST      | 8080         | `ccs`      | raw bytes over HTTP/1.1 |
//! | gRPC      | 1444         | (none)     | protobuf `ValueResponse` |
//! | local     | -            | -          | in-process map |

mod grpc_cache_client;
mod http_cache_client;
mod local_cache;

pub use grpc_cache_client::*;
pub use http_cache_client::*;
pub use local_cache::*;
