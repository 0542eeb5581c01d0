use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::db::models::{NewUserAccount, UserAccount};
use crate::db::store::UserStore;
use crate::error::DatabaseError;

pub struct PgUserStore {
    pool: Arc<PgPool>,
}

impl PgUserStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Opens the pool. Called once at startup; `AppState::shutdown` closes it.
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))
    }

    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|e| DatabaseError::MigrationError(e.to_string()))
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DatabaseError> {
        let user = sqlx::query_as::<_, UserAccount>(
            "SELECT id, email, password_hash, name, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn insert_unique(&self, user: NewUserAccount) -> Result<UserAccount, DatabaseError> {
        // The unique constraint on users.email is what decides a registration race.
        let user = sqlx::query_as::<_, UserAccount>(
            r#"
            INSERT INTO users (email, password_hash, name)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, name, created_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(user)
    }
}
