use async_trait::async_trait;
use shared::models::{LoginRequest, LoginResponse, User};

use crate::error::fallback;
use crate::{AtelierClient, ClientError, ClientResult};

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Authenticate; the returned user becomes the session user
    async fn login(&self, request: &LoginRequest) -> ClientResult<User>;
}

#[async_trait]
impl AuthApi for AtelierClient {
    async fn login(&self, request: &LoginRequest) -> ClientResult<User> {
        let response: LoginResponse = self
            .http()
            .post(&["auth", "login"], request)
            .await
            .map_err(fallback("Erreur lors de la connexion"))?;
        response
            .user
            .ok_or_else(|| ClientError::InvalidResponse("Missing login user".into()))
            .map_err(fallback("Erreur lors de la connexion"))
    }
}
