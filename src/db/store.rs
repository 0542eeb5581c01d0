use async_trait::async_trait;

use crate::db::models::{NewUserAccount, UserAccount};
use crate::error::DatabaseError;

/// Persistent user records keyed by a unique email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact, case-sensitive lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DatabaseError>;

    /// Creates the record in one atomic step. Returns `DatabaseError::Duplicate`
    /// when the email is already taken, including by a concurrent insert.
    async fn insert_unique(&self, user: NewUserAccount) -> Result<UserAccount, DatabaseError>;
}
