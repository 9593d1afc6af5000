//! Core infrastructure of the desk: configuration, logging, local storage,
//! session and routing.

pub mod config;
pub mod logger;
pub mod router;
pub mod session;
pub mod storage;

pub use config::{AppConfig, ConfigOverrides};
pub use router::{Navigation, Route};
pub use session::{AuthState, SessionContext};
pub use storage::{LocalStorage, StorageError};
