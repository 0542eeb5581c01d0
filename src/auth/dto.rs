//! Request and response shapes for the three credential operations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::db::models::UserView;
use crate::error::AuthError;

/// bcrypt ignores input past this many bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResult {
    pub user: UserView,
    pub token: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(AuthError::Validation("password must not be empty".into()));
        }
        if self.password.len() > MAX_PASSWORD_BYTES {
            return Err(AuthError::Validation(format!(
                "password must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }
        if self.name.trim().is_empty() {
            return Err(AuthError::Validation("name must not be empty".into()));
        }
        Ok(())
    }
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(AuthError::Validation("password must not be empty".into()));
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), AuthError> {
    let invalid = || AuthError::Validation("email is not a valid address".into());

    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
