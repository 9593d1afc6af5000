//! Profile of the signed-in user

use std::sync::Arc;

use atelier_client::UserApi;
use shared::models::User;

use crate::core::SessionContext;

pub const NO_SESSION_USER: &str = "Aucun utilisateur connecté trouvé";

pub struct ProfileScreen {
    api: Arc<dyn UserApi>,
    session: SessionContext,
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProfileScreen {
    pub fn new(api: Arc<dyn UserApi>, session: SessionContext) -> Self {
        Self {
            api,
            session,
            user: None,
            loading: false,
            error: None,
        }
    }

    /// Fetch the profile of the session user and refresh the session with it
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;

        let Some(current) = self.session.current_user().await else {
            self.error = Some(NO_SESSION_USER.to_string());
            self.loading = false;
            return;
        };

        match self.api.current_user(current.id).await {
            Ok(user) => {
                if let Err(e) = self.session.update_user(user.clone()).await {
                    tracing::warn!(error = %e, "Failed to persist refreshed profile");
                }
                self.user = Some(user);
            }
            Err(e) => {
                tracing::error!(user_id = current.id, error = %e, "Profile load failed");
                self.error = Some(e.user_message());
            }
        }
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LocalStorage;
    use crate::screens::testing::{FakeBackend, user};

    #[tokio::test]
    async fn test_profile_refreshes_session() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path().join("local_storage.json")));
        let session = SessionContext::new(storage);
        session.login(user(7, "awa")).await.unwrap();

        let backend = Arc::new(FakeBackend::new());
        let mut fresh = user(7, "awa");
        fresh.city = Some("Dakar".into());
        backend.users.lock().unwrap().push(fresh);

        let mut screen = ProfileScreen::new(backend.clone(), session.clone());
        screen.load().await;
        assert_eq!(screen.user.as_ref().and_then(|u| u.city.as_deref()), Some("Dakar"));
        assert_eq!(session.current_user().await.unwrap().city.as_deref(), Some("Dakar"));
    }

    #[tokio::test]
    async fn test_no_session_user() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path().join("local_storage.json")));
        let backend = Arc::new(FakeBackend::new());

        let mut screen = ProfileScreen::new(backend.clone(), SessionContext::new(storage));
        screen.load().await;
        assert_eq!(screen.error.as_deref(), Some(NO_SESSION_USER));
        assert_eq!(backend.total_calls(), 0);
    }
}
