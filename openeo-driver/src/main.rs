use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod db;
pub mod gateway;
pub mod projection;
pub mod registry;
pub mod service;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "openeo_driver=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting openEO GRASS driver...");

    let config = config::Config::from_env().expect("Invalid configuration");

    tracing::info!("Opening registry database at {:?}", config.database_path);

    let pool = db::create_pool(&config.database_path)
        .await
        .expect("Failed to open registry database");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let gateway = Arc::new(gateway::ActiniaGateway::new(
        &config.actinia_url,
        &config.actinia_user,
        &config.actinia_password,
    ));

    // Build router with all API endpoints
    let app = api::create_router(api::AppState { pool, gateway });

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
