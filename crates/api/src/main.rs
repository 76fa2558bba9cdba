use anyhow::{Context, Result};
use tracing::info;

use matchmaker_api::{app, config, middleware};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::Config::load().context("Failed to load configuration")?;

    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics().context("Failed to install metrics recorder")?;

    info!("Starting matchmaker API v{}", env!("CARGO_PKG_VERSION"));

    let pool = persistence::db::create_pool(&config.pool_settings()).await?;

    info!("Running database migrations...");
    persistence::db::run_migrations(&pool).await?;

    let stores = persistence::pg_stores(pool.clone());
    let addr = config.socket_addr().context("Invalid server host/port")?;
    let app = app::create_app(config, stores, Some(pool));

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
