mod api;
mod audit;
mod auth;
mod dashboard;
mod display;
mod error;
mod media;
mod middleware;
mod notification;
mod rota;
mod routes;
mod site;
mod state;
mod tracking;
mod user;
mod vehicle;
mod walkaround;
mod websocket;

#[cfg(test)]
mod test_support;

use anyhow::Context;
use routes::create_router;
use state::{AppState, Config};
use tracking::start_tracking_simulation;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fleet_dashboard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Fleet API at {}", config.api_base_url);

    let state = AppState::new(config)?;

    // Start the live tracking simulation
    let board = state.tracking.clone();
    tokio::spawn(async move {
        if let Err(e) = start_tracking_simulation(board).await {
            tracing::error!("Tracking simulation error: {:?}", e);
        }
    });

    let app = create_router(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
