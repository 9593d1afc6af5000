//! Shared types for the Atelier workspace
//!
//! Wire models mirrored from the backend JSON plus the pure helpers used by
//! the desk screens: formatting, validation, price preview, weekly ledger
//! grouping and badges.

pub mod badge;
pub mod format;
pub mod ledger;
pub mod models;
pub mod pricing;
pub mod response;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use response::{MessageResponse, Pagination};
pub use validation::FieldErrors;
