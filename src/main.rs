use std::sync::Arc;

use cineflix_api::{app, config::AppConfig, database, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up CONNECTION_URI, PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let db = database::connect(&config.database).await?;

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let state = AppState::new(db, Arc::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("cineflix-api listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
