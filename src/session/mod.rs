//! Current user and token, shared by every outgoing request.
//!
//! The context is created once at startup from whatever the store holds, is
//! mutated by login and logout, and is read by the API client on every call.

pub mod store;
pub mod token;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::SessionError;
use crate::models::{Role, User};

pub use store::{MemorySessionStore, SessionStore, SqliteSessionStore, StoredSession};
pub use token::{decode_claims, user_from_claims};

/// Capability flags derived from the current user's role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleFlags {
    pub is_authenticated: bool,
    pub is_super_admin: bool,
    pub is_admin: bool,
    pub is_teacher: bool,
}

impl RoleFlags {
    pub fn for_user(user: Option<&User>) -> Self {
        match user.map(|u| u.role) {
            None => Self::default(),
            Some(role) => Self {
                is_authenticated: true,
                is_super_admin: role == Role::SuperAdmin,
                is_admin: role == Role::Admin,
                is_teacher: role == Role::Teacher,
            },
        }
    }
}

pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    user: RwLock<Option<User>>,
}

impl SessionContext {
    pub async fn init(store: Arc<dyn SessionStore>) -> Result<Self, SessionError> {
        let user = load_or_reset(store.as_ref()).await?.map(|s| s.user);
        if let Some(u) = &user {
            info!("restored session for {} ({})", u.email, u.role);
        }
        Ok(Self {
            store,
            user: RwLock::new(user),
        })
    }

    pub async fn login(&self, token: String, user: User) -> Result<(), SessionError> {
        let stored = StoredSession { token, user };
        self.store.save(&stored).await?;
        info!("signed in as {} ({})", stored.user.email, stored.user.role);
        *self.user.write().await = Some(stored.user);
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), SessionError> {
        self.store.clear().await?;
        *self.user.write().await = None;
        info!("signed out");
        Ok(())
    }

    /// Drops the session after the backend rejected the token.
    pub async fn expire(&self) -> Result<(), SessionError> {
        warn!("session expired; clearing stored credentials");
        self.store.clear().await?;
        *self.user.write().await = None;
        Ok(())
    }

    pub async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    /// Token as currently persisted. Read per request so another writer's
    /// login or logout is picked up.
    pub async fn token(&self) -> Result<Option<String>, SessionError> {
        Ok(load_or_reset(self.store.as_ref()).await?.map(|s| s.token))
    }

    pub async fn flags(&self) -> RoleFlags {
        RoleFlags::for_user(self.user.read().await.as_ref())
    }
}

/// A stored session that no longer parses is discarded and treated as
/// signed out.
async fn load_or_reset(store: &dyn SessionStore) -> Result<Option<StoredSession>, SessionError> {
    match store.load().await {
        Err(SessionError::Corrupt(e)) => {
            warn!("discarding unreadable stored session: {}", e);
            store.clear().await?;
            Ok(None)
        }
        other => other,
    }
}
