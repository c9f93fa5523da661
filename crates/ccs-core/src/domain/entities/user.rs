//! User entity.

use crate::UserId;
use serde::{Deserialize, Serialize};

/// User record stored in the remote cache, keyed by its id.
///
/// The id is fixed at construction. Name and email are validated by the
/// service layer before a user is built or changed, so a stored user never
/// carries empty values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, also the cache key.
    id: UserId,

    /// Display name.
    name: String,

    /// Email address.
    email: String,
}

impl User {
    /// Creates a new user with a freshly generated id.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::with_id(UserId::generate(), name, email)
    }

    /// Creates a user with a known id.
    #[must_use]
    pub fn with_id(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Returns the user id.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the user's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the user's email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Replaces name and email. The id stays the same.
    pub fn rename(&mut self, name: impl Into<String>, email: impl Into<String>) {
        self.name = name.into();
        self.email = email.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_gets_fresh_id() {
        let a = User::new("Alice", "alice@x.com");
        let b = User::new("Alice", "alice@x.com");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.name(), "Alice");
        assert_eq!(a.email(), "alice@x.com");
    }

    #[test]
    fn test_rename_keeps_id() {
        let mut user = User::new("Alice", "alice@x.com");
        let id = user.id().clone();
        user.rename("Alicia", "alicia@x.com");
        assert_eq!(user.id(), &id);
        assert_eq!(user.name(), "Alicia");
        assert_eq!(user.email(), "alicia@x.com");
    }

    #[test]
    fn test_json_shape() {
        let user = User::with_id(UserId::new("u-1"), "Bob", "bob@x.com");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "u-1", "name": "Bob", "email": "bob@x.com"})
        );
        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
    }
}
