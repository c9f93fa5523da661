//! Raw cache backend trait implemented by every transport.

use async_trait::async_trait;
use ccs_core::CcsResult;

/// Whether a mutating call should send back the value it displaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Return {
    /// Do not return the previous value.
    #[default]
    Nothing,
    /// Return the previous value, if any.
    OldValue,
}

impl Return {
    /// Returns true if the previous value was requested.
    #[must_use]
    pub const fn wants_old_value(self) -> bool {
        matches!(self, Self::OldValue)
    }
}

/// A named cache on the remote side, operating on raw bytes.
///
/// `None` always means "no entry"; errors are reserved for transport or
/// remote failures.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Name of the cache this backend talks to.
    fn name(&self) -> &str;

    /// Fetches the value stored under `key`.
    async fn get(&self, key: &str) -> CcsResult<Option<Vec<u8>>>;

    /// Stores `value` under `key` unconditionally.
    ///
    /// With [`Return::OldValue`] the displaced value is returned; otherwise
    /// the result is always `None`.
    async fn put(&self, key: &str, value: Vec<u8>, ret: Return) -> CcsResult<Option<Vec<u8>>>;

    /// Stores `value` under `key` only if an entry already exists.
    ///
    /// Returns the previous value when the entry was replaced, `None` when
    /// there was nothing to replace and nothing was written.
    async fn replace(&self, key: &str, value: Vec<u8>) -> CcsResult<Option<Vec<u8>>>;

    /// Removes the entry under `key`.
    ///
    /// With [`Return::OldValue`] the removed value is returned, `None` if
    /// there was no entry.
    async fn remove(&self, key: &str, ret: Return) -> CcsResult<Option<Vec<u8>>>;
}
