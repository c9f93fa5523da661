//! Result type aliases for the CCS user service.

use crate::CcsError;

/// A specialized `Result` type for CCS operations.
pub type CcsResult<T> = Result<T, CcsError>;
