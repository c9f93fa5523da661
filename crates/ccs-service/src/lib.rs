//! # CCS Service
//!
//! User create/read/update/delete operations on top of a named remote cache.

pub mod cache_user_service;
pub mod dto;
pub mod user_service;

pub use cache_user_service::*;
pub use dto::*;
pub use user_service::*;
