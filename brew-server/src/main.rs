//! brew-server — coffee shop back-office service
//!
//! Long-running HTTP service that:
//! - Manages the menu catalog and ingredient inventory
//! - Accepts and fulfills customer orders (single and batch)
//! - Serves sales reports and full-text search

mod api;
mod config;
mod db;
mod services;
mod state;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brew_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting brew-server (env: {})", config.environment);

    // Initialize application state (pool + migrations)
    let state = AppState::new(&config).await?;

    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("brew-server listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
