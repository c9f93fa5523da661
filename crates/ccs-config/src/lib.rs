//! # CCS Config
//!
//! Connection configuration for the remote cache: transport selection,
//! connection URL derivation, and layered loading from files and
//! `CACHING_*` environment variables.

mod cache_config;
mod loader;
mod transport;
mod validation;

pub use cache_config::*;
pub use loader::*;
pub use transport::*;
pub use validation::*;
