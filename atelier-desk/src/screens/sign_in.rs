//! Sign-in form

use std::sync::Arc;

use atelier_client::AuthApi;
use shared::FieldErrors;
use shared::models::LoginRequest;

use crate::core::{Route, SessionContext};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email_or_username: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require(
            "emailOrUsername",
            &self.email_or_username,
            "L'email ou nom d'utilisateur est requis",
        );
        errors.require("password", &self.password, "Le mot de passe est requis");
        errors
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// Signed in; navigate to the route
    Redirect(Route),
    Invalid(FieldErrors),
    /// Rejected or unreachable; banner text
    Failed(String),
}

pub struct SignInScreen {
    api: Arc<dyn AuthApi>,
    session: SessionContext,
}

impl SignInScreen {
    pub fn new(api: Arc<dyn AuthApi>, session: SessionContext) -> Self {
        Self { api, session }
    }

    pub async fn submit(&self, form: &SignInForm) -> SignInOutcome {
        let errors = form.validate();
        if !errors.is_empty() {
            return SignInOutcome::Invalid(errors);
        }

        let request = LoginRequest {
            email_or_username: form.email_or_username.trim().to_string(),
            password: form.password.clone(),
        };
        let user = match self.api.login(&request).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Sign-in failed");
                return SignInOutcome::Failed(e.user_message());
            }
        };

        if let Err(e) = self.session.login(user).await {
            tracing::error!(error = %e, "Failed to persist session");
            return SignInOutcome::Failed(e.to_string());
        }
        SignInOutcome::Redirect(Route::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LocalStorage;
    use crate::screens::testing::{FakeBackend, user};

    fn setup() -> (tempfile::TempDir, Arc<FakeBackend>, SessionContext) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path().join("local_storage.json")));
        let backend = Arc::new(FakeBackend::new());
        backend.users.lock().unwrap().push(user(7, "awa"));
        (dir, backend, SessionContext::new(storage))
    }

    #[tokio::test]
    async fn test_blank_password_never_reaches_network() {
        let (_dir, backend, session) = setup();
        let screen = SignInScreen::new(backend.clone(), session);

        let outcome = screen
            .submit(&SignInForm {
                email_or_username: "awa".into(),
                password: "   ".into(),
            })
            .await;
        let SignInOutcome::Invalid(errors) = outcome else {
            panic!("expected field errors, got {outcome:?}");
        };
        assert_eq!(errors.get("password"), Some("Le mot de passe est requis"));
        assert!(!errors.contains("emailOrUsername"));
        assert_eq!(backend.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_success_opens_session() {
        let (_dir, backend, session) = setup();
        let screen = SignInScreen::new(backend.clone(), session.clone());

        let outcome = screen
            .submit(&SignInForm {
                email_or_username: "awa".into(),
                password: "secret".into(),
            })
            .await;
        assert_eq!(outcome, SignInOutcome::Redirect(Route::Home));
        assert_eq!(session.current_user().await.map(|u| u.id), Some(7));
    }

    #[tokio::test]
    async fn test_rejection_shows_server_message() {
        let (_dir, backend, session) = setup();
        let screen = SignInScreen::new(backend, session.clone());

        let outcome = screen
            .submit(&SignInForm {
                email_or_username: "inconnu".into(),
                password: "secret".into(),
            })
            .await;
        assert_eq!(outcome, SignInOutcome::Failed("Identifiants invalides".into()));
        assert!(!session.is_authenticated().await);
    }
}
