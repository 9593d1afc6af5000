//! Atelier Client - HTTP client for the tailoring-shop backend
//!
//! Typed access to the REST API. Every operation returns a single
//! [`ClientResult`]; services are grouped per resource in [`api`].

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod upload;

pub use api::{AuthApi, CustomerApi, ModeleApi, OrderApi, TransactionApi, UserApi};
pub use client::AtelierClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use upload::UploadFile;
