//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use auth_service::db::NewUserAccount;
use auth_service::error::DatabaseError;
use auth_service::{AuthService, BcryptHasher, JwtIssuer, UserAccount, UserStore};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration_test_secret";

/// In-memory user store. The write lock makes check-and-insert a single step.
#[derive(Default, Clone)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<String, UserAccount>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn remove(&self, email: &str) -> Option<UserAccount> {
        self.users.write().await.remove(email)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DatabaseError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn insert_unique(&self, user: NewUserAccount) -> Result<UserAccount, DatabaseError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(DatabaseError::Duplicate);
        }

        let account = UserAccount {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            created_at: Utc::now(),
        };
        users.insert(account.email.clone(), account.clone());
        Ok(account)
    }
}

pub fn issuer() -> JwtIssuer {
    JwtIssuer::new(TEST_SECRET, chrono::Duration::hours(2))
}

pub fn service_with(store: MemoryUserStore) -> AuthService {
    AuthService::new(
        Arc::new(store),
        Arc::new(BcryptHasher::new(4).expect("valid cost")),
        Arc::new(issuer()),
    )
}
