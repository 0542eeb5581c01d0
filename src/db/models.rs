use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// A registered account as persisted in the `users` table.
#[derive(Clone, FromRow)]
pub struct UserAccount {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// The caller-safe projection of this account.
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

impl fmt::Debug for UserAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAccount")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("name", &self.name)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Insert payload. The store assigns `id` and `created_at`.
#[derive(Clone)]
pub struct NewUserAccount {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

impl fmt::Debug for NewUserAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUserAccount")
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

/// Public user view, also the claim set embedded in session tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> UserAccount {
        UserAccount {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$04$abcdefghijklmnopqrstuv".to_string(),
            name: "Ann".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_view_excludes_password_hash() {
        let account = account();
        let json = serde_json::to_value(account.view()).unwrap();

        assert_eq!(json["id"], account.id.to_string());
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["name"], "Ann");
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_debug_redacts_hash() {
        let output = format!("{:?}", account());
        assert!(output.contains("<redacted>"));
        assert!(!output.contains("$2b$04$"));
    }
}
