//! services/web/src/bin/init_db.rs
//!
//! One-time administrative command that creates the `entries` table. Run it
//! once before starting the server; request handling never touches the
//! schema.

use web_lib::{adapters::db::SqliteStore, config::Config, error::ApiError};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            config.log_level.to_string(),
        ))
        .init();

    let store = SqliteStore::connect(&config.database_url).await?;
    store.init_schema().await?;
    println!("Initialized the database.");

    Ok(())
}
