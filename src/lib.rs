pub mod auth;
pub mod config;
pub mod db;
pub mod error;

use std::sync::Arc;
use sqlx::PgPool;
use actix_web::{web, HttpResponse};
use tracing::{info, warn};

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use crate::config::Settings;

pub use auth::{AuthResult, AuthService, BcryptHasher, JwtIssuer, PasswordHasher, TokenIssuer};
pub use db::{PgUserStore, UserAccount, UserStore, UserView};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Registers every route this service exposes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health_check))
        .route("/auth/register", web::post().to(auth::handlers::register))
        .route("/auth/login", web::post().to(auth::handlers::login))
        .route("/auth/refresh", web::post().to(auth::handlers::refresh))
        .route("/rpc", web::post().to(auth::handlers::rpc));
}

/// Malformed JSON bodies become validation failures with the usual error body.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!("Rejected request body: {}", err);
        AppError::from(error::AuthError::Validation("malformed request body".into())).into()
    })
}

/// Application state shared across all workers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: Arc<PgPool>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Acquires the store connection and wires the collaborators. Pair with [`AppState::shutdown`].
    pub async fn new(config: Settings) -> Result<Self> {
        // Reject bad auth settings before any connection is opened.
        let token_ttl = config.auth.token_ttl()?;
        let hasher = BcryptHasher::new(config.auth.bcrypt_cost)
            .map_err(|e| AppError::ConfigError(e.to_string()))?;

        let db_pool = Arc::new(PgUserStore::connect(&config.database).await?);

        if config.database.run_migrations {
            PgUserStore::migrate(&db_pool).await?;
            info!("Database migrations applied");
        }

        let issuer = JwtIssuer::new(&config.auth.jwt_secret, token_ttl);
        let auth_service = AuthService::new(
            Arc::new(PgUserStore::new(db_pool.clone())),
            Arc::new(hasher),
            Arc::new(issuer),
        );

        Ok(Self::from_parts(db_pool, auth_service))
    }

    pub fn from_parts(db_pool: Arc<PgPool>, auth_service: AuthService) -> Self {
        Self {
            db_pool,
            auth_service: Arc::new(auth_service),
        }
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.db_pool.close().await;
        info!("Database pool closed");
        Ok(())
    }
}
