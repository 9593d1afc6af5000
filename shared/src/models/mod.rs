//! Data models
//!
//! Mirrors of the backend JSON records. Field names follow the wire format
//! (`camelCase`); IDs are `i64` assigned by the server, timestamps are kept
//! as the server's strings and only parsed for display.

pub mod auth;
pub mod customer;
pub mod measure;
pub mod modele;
pub mod order;
pub mod transaction;
pub mod user;

// Re-exports
pub use auth::*;
pub use customer::*;
pub use measure::*;
pub use modele::*;
pub use order::*;
pub use transaction::*;
pub use user::*;
