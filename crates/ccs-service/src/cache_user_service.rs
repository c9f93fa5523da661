//! Cache-backed user service.

use crate::dto::UserDetails;
use crate::user_service::UserService;
use async_trait::async_trait;
use ccs_client::{Cache, RemoteSessionProvider, Return, Session, SessionExt, SessionProvider};
use ccs_config::{CacheConfig, ConfigValidator};
use ccs_core::{CcsError, CcsResult, User, UserId, ValidateExt};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// User service storing users in a named remote cache, keyed by id.
#[derive(Clone)]
pub struct CacheUserService {
    users: Cache<User>,
    session: Option<Arc<dyn Session>>,
}

impl CacheUserService {
    /// Creates a service on an already opened cache handle.
    #[must_use]
    pub fn new(users: Cache<User>) -> Self {
        Self { users, session: None }
    }

    /// Creates a service using the cache `cache_name` of an open session.
    pub fn from_session(session: Arc<dyn Session>, cache_name: &str) -> CcsResult<Self> {
        let users = session.cache::<User>(cache_name)?;
        Ok(Self {
            users,
            session: Some(session),
        })
    }

    /// Opens a session to the remote cache described by `config` and binds
    /// the user cache.
    pub async fn connect(config: &CacheConfig) -> CcsResult<Self> {
        let provider = RemoteSessionProvider::from_config(config)?;
        Self::connect_with(&provider, config).await
    }

    /// Like [`connect`](Self::connect), with an explicit session provider.
    ///
    /// The configuration is validated before the provider is asked for a
    /// session.
    pub async fn connect_with<P>(provider: &P, config: &CacheConfig) -> CcsResult<Self>
    where
        P: SessionProvider + ?Sized,
    {
        ConfigValidator::ensure_valid(config)?;

        let session = provider.create_session(config.transport).await?;
        debug!(
            endpoint = session.endpoint(),
            transport = %config.transport,
            session = ?session,
            "Cache session opened"
        );

        let service = Self::from_session(session, &config.cache_name)?;
        debug!(cache = ?service.users, "Cache handle acquired");

        info!("User service connected to cache '{}'", config.cache_name);
        Ok(service)
    }

    /// The underlying cache handle.
    #[must_use]
    pub const fn cache(&self) -> &Cache<User> {
        &self.users
    }

    /// The session the cache handle came from, if the service opened one.
    #[must_use]
    pub fn session(&self) -> Option<&Arc<dyn Session>> {
        self.session.as_ref()
    }
}

#[async_trait]
impl UserService for CacheUserService {
    async fn get_user(&self, id: &UserId) -> CcsResult<Option<User>> {
        debug!("Getting user: {}", id);

        self.users.get(id.as_str()).await
    }

    async fn create_user(&self, name: &str, email: &str) -> CcsResult<User> {
        debug!("Creating user: {}", name);

        let details = UserDetails::new(name, email);
        details.validate_request()?;

        let user = User::new(details.name, details.email);
        self.users.put(user.id().as_str(), &user).await?;

        info!("User created: {}", user.id());
        Ok(user)
    }

    async fn update_user(&self, id: &UserId, name: &str, email: &str) -> CcsResult<User> {
        debug!("Updating user: {}", id);

        let mut user = self
            .users
            .get(id.as_str())
            .await?
            .ok_or_else(|| CcsError::not_found("User", id))?;

        let details = UserDetails::new(name, email);
        details.validate_request()?;

        user.rename(details.name, details.email);

        // Unconditional replace: a concurrent update may be lost, a concurrent
        // delete is reported as not found.
        if !self.users.replace(id.as_str(), &user).await? {
            return Err(CcsError::not_found("User", id));
        }

        info!("User updated: {}", id);
        Ok(user)
    }

    async fn delete_user(&self, id: &UserId) -> CcsResult<User> {
        debug!("Deleting user: {}", id);

        let user = self
            .users
            .remove(id.as_str(), Return::OldValue)
            .await?
            .ok_or_else(|| CcsError::not_found("User", id))?;

        info!("User deleted: {}", id);
        Ok(user)
    }
}

impl fmt::Debug for CacheUserService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheUserService")
            .field("users", &self.users)
            .field("session", &self.session)
            .finish()
    }
}
