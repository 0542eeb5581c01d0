//! Password hashing.
//!
//! `PasswordHasher` is the seam the auth service depends on; `BcryptHasher`
//! is the implementation wired in by `AppState`.

use async_trait::async_trait;

use crate::error::PasswordError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// One-way hash of `plaintext`, salted per call.
    async fn hash(&self, plaintext: &str) -> Result<String, PasswordError>;

    /// Constant-time check of `plaintext` against a stored hash.
    async fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordError>;
}

pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub const DEFAULT_COST: u32 = 10;

    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        if !(4..=31).contains(&cost) {
            return Err(PasswordError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self { cost: Self::DEFAULT_COST }
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;

        // bcrypt is deliberately slow; keep it off the async workers.
        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| PasswordError::HashError(e.to_string()))?
            .map_err(|e| PasswordError::HashError(e.to_string()))
    }

    async fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordError> {
        let plaintext = plaintext.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &hash))
            .await
            .map_err(|e| PasswordError::HashError(e.to_string()))?
            .map_err(|e| PasswordError::HashError(e.to_string()))
    }
}
