//! Database module for the credential service
//!
//! This module holds the persistent user record, the `UserStore`
//! collaborator interface, and its PostgreSQL implementation.

pub mod models;
pub mod postgres;
pub mod store;

pub use models::{NewUserAccount, UserAccount, UserView};
pub use postgres::PgUserStore;
pub use store::UserStore;
