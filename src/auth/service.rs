use std::sync::Arc;
use tracing::{error, info, warn};

use crate::auth::dto::{AuthResult, LoginRequest, RegisterRequest, MAX_PASSWORD_BYTES};
use crate::auth::password::PasswordHasher;
use crate::auth::token::TokenIssuer;
use crate::db::models::{NewUserAccount, UserView};
use crate::db::store::UserStore;
use crate::error::{AuthError, DatabaseError, TokenError};

/// Registration, login and token refresh.
///
/// Holds no mutable state of its own; any number of calls may run
/// concurrently against the same instance.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self { users, hasher, tokens }
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResult, AuthError> {
        req.validate()?;
        info!("Registering account for email: {}", req.email);

        // Fast path only. The insert below is what actually enforces uniqueness.
        if self.users.find_by_email(&req.email).await.map_err(store_failure)?.is_some() {
            warn!("Registration rejected, account exists: {}", req.email);
            return Err(AuthError::AccountExists);
        }

        let password_hash = self.hasher.hash(&req.password).await.map_err(|e| {
            error!("Password hashing failed: {}", e);
            AuthError::Internal
        })?;

        let account = self
            .users
            .insert_unique(NewUserAccount {
                email: req.email,
                password_hash,
                name: req.name,
            })
            .await
            .map_err(|e| match e {
                DatabaseError::Duplicate => {
                    warn!("Registration lost insert race for an existing email");
                    AuthError::AccountExists
                }
                other => store_failure(other),
            })?;

        info!("Registered account {} for email: {}", account.id, account.email);
        self.issue(account.view()).await
    }

    pub async fn login(&self, req: LoginRequest) -> Result<AuthResult, AuthError> {
        req.validate()?;
        info!("Login attempt for email: {}", req.email);

        // bcrypt only sees the first 72 bytes; longer input could match a shorter password.
        if req.password.len() > MAX_PASSWORD_BYTES {
            warn!("Login failed for email: {}", req.email);
            return Err(AuthError::InvalidCredentials);
        }

        let account = match self.users.find_by_email(&req.email).await.map_err(store_failure)? {
            Some(account) => account,
            None => {
                warn!("Login failed for email: {}", req.email);
                return Err(AuthError::InvalidCredentials);
            }
        };

        let matches = self
            .hasher
            .verify(&req.password, &account.password_hash)
            .await
            .map_err(|e| {
                error!("Password verification failed for account {}: {}", account.id, e);
                AuthError::Internal
            })?;

        if !matches {
            warn!("Login failed for email: {}", req.email);
            return Err(AuthError::InvalidCredentials);
        }

        info!("Login successful for account {}", account.id);
        self.issue(account.view()).await
    }

    /// Re-issues a token for the claims embedded in `token`.
    ///
    /// The claims are trusted as-is; the store is not consulted, so an account
    /// changed after issuance keeps its old claims until the token lapses.
    pub async fn refresh(&self, token: &str) -> Result<AuthResult, AuthError> {
        let user = self.tokens.verify(token).await.map_err(|e| {
            warn!("Refresh rejected: {}", e);
            AuthError::InvalidToken
        })?;

        info!("Refreshing token for account {}", user.id);
        self.issue(user).await
    }

    async fn issue(&self, user: UserView) -> Result<AuthResult, AuthError> {
        let token = self.tokens.sign(&user).await.map_err(|e: TokenError| {
            error!("Token signing failed for account {}: {}", user.id, e);
            AuthError::Internal
        })?;

        Ok(AuthResult { user, token })
    }
}

fn store_failure(err: DatabaseError) -> AuthError {
    error!("User store failure: {}", err);
    AuthError::Internal
}
