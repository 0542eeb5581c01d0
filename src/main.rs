use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use auth_service::config::CorsConfig;
use auth_service::{configure_routes, AppState, Settings};
use dotenv::dotenv;
use std::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn build_cors(config: &CorsConfig) -> Cors {
    if !config.enabled {
        // CORS disabled - use most restrictive settings
        return Cors::default();
    }

    let cors = if config.allow_any_origin {
        Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
    } else {
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec!["Authorization", "Content-Type"])
    };

    cors.max_age(config.max_age as usize)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let config = Settings::new().context("failed to load configuration")?;
    info!("Configuration loaded for environment: {}", config.environment);

    if config.is_production() && config.auth.jwt_secret == "development_secret" {
        warn!("Running in production with the default JWT secret");
    }

    let state = AppState::new(config.clone())
        .await
        .context("failed to initialise application state")?;
    let data = web::Data::new(state.clone());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).with_context(|| format!("failed to bind {}", addr))?;
    info!("Auth service listening on http://{}", addr);

    let cors_config = config.cors.clone();
    let served = HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&cors_config))
            .app_data(data.clone())
            .configure(configure_routes)
    })
    .listen(listener)?
    .workers(config.server.workers as usize)
    .run()
    .await;

    // Release the store connection whether or not the server exited cleanly.
    state.shutdown().await?;
    served.context("http server failed")?;

    info!("Auth service stopped");
    Ok(())
}
