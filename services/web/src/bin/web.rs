//! services/web/src/bin/web.rs

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use web_lib::{
    adapters::db::SqliteStore,
    config::Config,
    error::ApiError,
    web::{router, AppState},
};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Open the Database ---
    info!("Opening database at {}", config.database_url);
    let store = Arc::new(SqliteStore::connect(&config.database_url).await?);

    // --- 3. Build the Shared AppState & Router ---
    let app_state = AppState::new(store, config.clone());
    let app = router(app_state).layer(TraceLayer::new_for_http());

    // --- 4. Start the Server ---
    info!("Listening on http://{}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
