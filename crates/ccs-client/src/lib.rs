//! # CCS Client
//!
//! Session and cache-handle client for the remote cache.
//!
//! A [`SessionProvider`] opens a [`Session`] for a [`Transport`]; the session
//! hands out named [`CacheBackend`]s which [`Cache`] wraps with typed JSON
//! encoding. REST and gRPC transports talk to a remote cache; the local
//! transport keeps everything in memory.

mod backend;
mod cache;
pub mod clients;
pub mod proto;
mod session;

pub use backend::*;
pub use cache::*;
pub use clients::*;
pub use session::*;

pub use ccs_config::Transport;
