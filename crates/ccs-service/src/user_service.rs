//! User service trait definition.

use async_trait::async_trait;
use ccs_core::{CcsResult, User, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Gets a user by ID. Returns `Ok(None)` if there is no such user.
    async fn get_user(&self, id: &UserId) -> CcsResult<Option<User>>;

    /// Creates a new user with a fresh ID.
    async fn create_user(&self, name: &str, email: &str) -> CcsResult<User>;

    /// Replaces a user's name and email.
    async fn update_user(&self, id: &UserId, name: &str, email: &str) -> CcsResult<User>;

    /// Deletes a user and returns the removed record.
    async fn delete_user(&self, id: &UserId) -> CcsResult<User>;
}
