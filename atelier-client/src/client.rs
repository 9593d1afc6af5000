//! Backend client
//!
//! One value talks to the whole API; each resource's operations live in the
//! service traits of [`crate::api`], all implemented for [`AtelierClient`].

use crate::{ClientConfig, ClientResult, HttpClient};

#[derive(Debug, Clone)]
pub struct AtelierClient {
    http: HttpClient,
}

impl AtelierClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Client from `ATELIER_API_URL` / `ATELIER_TIMEOUT_SECS`
    pub fn from_env() -> ClientResult<Self> {
        Self::new(&ClientConfig::from_env())
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}
