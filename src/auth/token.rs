use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::models::UserView;
use crate::error::TokenError;

/// Signed session token payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub iat: i64, // Issued at
    pub exp: i64, // Expiration time
}

impl From<Claims> for UserView {
    fn from(claims: Claims) -> Self {
        UserView {
            id: claims.id,
            email: claims.email,
            name: claims.name,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn sign(&self, user: &UserView) -> Result<String, TokenError>;

    /// Fails with `Invalid` or `Expired`; never returns claims from an unverified token.
    async fn verify(&self, token: &str) -> Result<UserView, TokenError>;
}

pub struct JwtIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }
}

#[async_trait]
impl TokenIssuer for JwtIssuer {
    async fn sign(&self, user: &UserView) -> Result<String, TokenError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Signing("token expiry out of range".into()))?;
        let claims = Claims {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    async fn verify(&self, token: &str) -> Result<UserView, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims.into())
    }
}
