//! # CCS Core
//!
//! Core types shared by the CCS user service crates: the unified error type,
//! typed ids, the `User` entity, validation helpers, and tracing bootstrap.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use telemetry::{init_tracing, LoggingConfig};
pub use validation::*;
