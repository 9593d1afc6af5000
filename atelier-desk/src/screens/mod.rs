//! Screen controllers
//!
//! One controller per page of the back-office. List pages share the
//! [`lifecycle`] loop; the calendar, weekly ledger, profile, sign-in and
//! dashboard pages derive their state from dedicated reads.

pub mod calendar;
pub mod carousel;
pub mod customers;
pub mod dashboard;
pub mod lifecycle;
pub mod modeles;
pub mod orders;
pub mod profile;
pub mod sign_in;
pub mod transactions;
pub mod users;
pub mod weekly_ledger;

#[cfg(test)]
pub(crate) mod testing;

pub use calendar::{CalendarEvent, CalendarScreen, CalendarView};
pub use carousel::Carousel;
pub use customers::{CustomerForm, CustomerResource, CustomersScreen, MeasureSheet};
pub use dashboard::DashboardScreen;
pub use lifecycle::{
    Confirm, DeleteOutcome, FormMode, FormModal, Listing, Resource, ResourceScreen, SubmitOutcome,
};
pub use modeles::{ModeleForm, ModeleResource, ModelesScreen};
pub use orders::{OrderFilter, OrderForm, OrderItemForm, OrderResource, OrdersScreen};
pub use profile::ProfileScreen;
pub use sign_in::{SignInForm, SignInOutcome, SignInScreen};
pub use transactions::{TransactionForm, TransactionResource, TransactionsScreen};
pub use users::{PasswordChange, UserForm, UserResource, UsersScreen};
pub use weekly_ledger::{Grouping, WeeklyLedgerScreen};
