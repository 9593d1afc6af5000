use async_trait::async_trait;
use serde::Serialize;
use shared::models::{
    ChangePassword, ExistsResponse, User, UserCreate, UserFilters, UserList, UserOperation,
    UserUpdate,
};

use crate::error::fallback;
use crate::{AtelierClient, ClientError, ClientResult};

#[async_trait]
pub trait UserApi: Send + Sync {
    async fn list_users(&self, filters: &UserFilters) -> ClientResult<UserList>;

    async fn get_user(&self, id: i64) -> ClientResult<User>;

    /// Profile of the signed-in user
    async fn current_user(&self, user_id: i64) -> ClientResult<User>;

    async fn create_user(&self, request: &UserCreate) -> ClientResult<UserOperation>;

    async fn update_user(&self, id: i64, request: &UserUpdate) -> ClientResult<UserOperation>;

    async fn delete_user(&self, id: i64) -> ClientResult<()>;

    async fn change_password(&self, id: i64, request: &ChangePassword) -> ClientResult<()>;

    /// Flip between active and inactive
    async fn toggle_user_status(&self, id: i64) -> ClientResult<UserOperation>;

    async fn email_exists(&self, email: &str) -> ClientResult<bool>;

    async fn user_name_exists(&self, user_name: &str) -> ClientResult<bool>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CurrentUserQuery {
    user_id: i64,
}

fn required_user(operation: UserOperation) -> ClientResult<User> {
    operation
        .user
        .ok_or_else(|| ClientError::InvalidResponse("Missing user".into()))
}

#[async_trait]
impl UserApi for AtelierClient {
    async fn list_users(&self, filters: &UserFilters) -> ClientResult<UserList> {
        self.http()
            .get_query(&["users"], filters)
            .await
            .map_err(fallback("Erreur lors de la récupération des utilisateurs"))
    }

    async fn get_user(&self, id: i64) -> ClientResult<User> {
        self.http()
            .get(&["users", &id.to_string()])
            .await
            .and_then(required_user)
            .map_err(fallback("Erreur lors de la récupération de l'utilisateur"))
    }

    async fn current_user(&self, user_id: i64) -> ClientResult<User> {
        self.http()
            .get_query(&["users", "me"], &CurrentUserQuery { user_id })
            .await
            .and_then(required_user)
            .map_err(fallback(
                "Erreur lors de la récupération du profil utilisateur",
            ))
    }

    async fn create_user(&self, request: &UserCreate) -> ClientResult<UserOperation> {
        self.http()
            .post(&["users"], request)
            .await
            .map_err(fallback("Erreur lors de la création de l'utilisateur"))
    }

    async fn update_user(&self, id: i64, request: &UserUpdate) -> ClientResult<UserOperation> {
        self.http()
            .put(&["users", &id.to_string()], request)
            .await
            .map_err(fallback("Erreur lors de la mise à jour de l'utilisateur"))
    }

    async fn delete_user(&self, id: i64) -> ClientResult<()> {
        self.http()
            .delete(&["users", &id.to_string()])
            .await
            .map_err(fallback("Erreur lors de la suppression de l'utilisateur"))
    }

    async fn change_password(&self, id: i64, request: &ChangePassword) -> ClientResult<()> {
        self.http()
            .put::<serde_json::Value, _>(&["users", &id.to_string(), "change-password"], request)
            .await
            .map(drop)
            .map_err(fallback("Erreur lors du changement de mot de passe"))
    }

    async fn toggle_user_status(&self, id: i64) -> ClientResult<UserOperation> {
        self.http()
            .put_empty(&["users", &id.to_string(), "toggle-status"])
            .await
            .map_err(fallback("Erreur lors du changement de statut"))
    }

    async fn email_exists(&self, email: &str) -> ClientResult<bool> {
        let response: ExistsResponse = self
            .http()
            .get(&["users", "check-email", email])
            .await
            .map_err(fallback("Erreur lors de la vérification de l'email"))?;
        Ok(response.exists)
    }

    async fn user_name_exists(&self, user_name: &str) -> ClientResult<bool> {
        let response: ExistsResponse = self
            .http()
            .get(&["users", "check-username", user_name])
            .await
            .map_err(fallback(
                "Erreur lors de la vérification du nom d'utilisateur",
            ))?;
        Ok(response.exists)
    }
}
