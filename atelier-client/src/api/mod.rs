//! Resource services
//!
//! One trait per backend resource. The desk screens depend on these traits,
//! never on the concrete client, so tests can swap in fakes.

mod auth;
mod customers;
mod modeles;
mod orders;
mod transactions;
mod users;

pub use auth::AuthApi;
pub use customers::CustomerApi;
pub use modeles::ModeleApi;
pub use orders::OrderApi;
pub use transactions::TransactionApi;
pub use users::UserApi;
