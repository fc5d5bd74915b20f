use std::sync::Arc;

use anyhow::Context;
use axum::Router;

mod config;
mod database;
mod dtos;
mod errors;
mod handlers;
mod middleware;
mod models;
mod routes;
mod state;

use config::AppConfig;
use database::connection::get_db_client;
use database::profile_store::MongoProfileStore;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    let app_state = initialize_app_state(&config).await?;
    let app = routes::build_router(app_state);

    start_server(app, &config).await
}

async fn initialize_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let db = get_db_client(config)
        .await
        .context("failed to connect to MongoDB")?;

    let store = MongoProfileStore::new(db);
    store
        .ensure_indexes()
        .await
        .context("failed to create profile indexes")?;

    tracing::info!("✅ Profile store ready");
    Ok(AppState::new(Arc::new(store), config.jwt_secret.as_str()))
}

async fn start_server(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    tracing::info!("🚀 Server starting on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
