//! Session context
//!
//! The signed-in user lives in memory behind an async lock and is mirrored to
//! the local-storage file under `auth_user`, so a restart keeps the session.

use std::sync::Arc;

use shared::models::User;
use tokio::sync::RwLock;

use super::storage::{LocalStorage, StorageError};

/// Local-storage key of the session user
pub const AUTH_USER_KEY: &str = "auth_user";

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<User>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Shared handle on the session; clones see the same state
#[derive(Debug, Clone)]
pub struct SessionContext {
    state: Arc<RwLock<AuthState>>,
    storage: Arc<LocalStorage>,
}

impl SessionContext {
    /// Empty session backed by `storage`
    pub fn new(storage: Arc<LocalStorage>) -> Self {
        Self {
            state: Arc::new(RwLock::new(AuthState::default())),
            storage,
        }
    }

    /// Load the persisted user, if any
    ///
    /// An unreadable entry is dropped and the session starts signed out. A
    /// storage file that no longer parses is reset to an empty map.
    pub fn restore(storage: Arc<LocalStorage>) -> Self {
        let user = match storage.get::<User>(AUTH_USER_KEY) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session");
                if let Err(e) = storage.remove(AUTH_USER_KEY) {
                    tracing::warn!(error = %e, path = %storage.path().display(), "Resetting corrupt local storage");
                    if let Err(e) = storage.reset() {
                        tracing::error!(error = %e, "Failed to reset local storage");
                    }
                }
                None
            }
        };
        if let Some(user) = &user {
            tracing::debug!(user_id = user.id, "Session restored");
        }
        Self {
            state: Arc::new(RwLock::new(AuthState { user })),
            storage,
        }
    }

    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    pub async fn login(&self, user: User) -> Result<(), StorageError> {
        self.storage.set(AUTH_USER_KEY, &user)?;
        tracing::info!(user_id = user.id, user_name = %user.user_name, "Signed in");
        self.state.write().await.user = Some(user);
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), StorageError> {
        self.storage.remove(AUTH_USER_KEY)?;
        let previous = self.state.write().await.user.take();
        if let Some(user) = previous {
            tracing::info!(user_id = user.id, "Signed out");
        }
        Ok(())
    }

    /// Replace the session user after a profile refresh
    pub async fn update_user(&self, user: User) -> Result<(), StorageError> {
        self.storage.set(AUTH_USER_KEY, &user)?;
        self.state.write().await.user = Some(user);
        Ok(())
    }
}
