//! store-server — Storefront checkout backend
//!
//! Long-running service that:
//! - Maintains per-user carts and creates priced, immutable orders
//! - Creates hosted payment sessions for card checkouts
//! - Reconciles gateway completion events (idempotent, at-least-once safe)
//! - Records reconciliation failures for operator remediation

use store_server::api;
use store_server::core::{AppState, Config};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenv::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "store_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        environment = %config.environment,
        cash_auto_place = config.cash_auto_place,
        "Starting store-server"
    );

    let state = AppState::new(&config);
    let app = api::router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("store-server listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
