use anyhow::Result;
use tracing::info;

use backwave::config::Config;
use backwave::ids::CodeGenerator;
use backwave::server::{self, AppState};
use backwave::store::Store;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("backwave=info".parse()?),
        )
        .init();

    info!("Starting Backwave API");

    // Load configuration from environment
    let config = Config::from_env()?;

    // Open the store, creating the database directory on first run
    if let Some(parent) = std::path::Path::new(&config.database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let store = Store::new(&config.database_path)?;

    // Stock the survey code reserve
    let added = store.replenish_reserve(config.min_id_reserve)?;
    if added > 0 {
        info!("Added {} survey codes to the reserve", added);
    }

    let codes = CodeGenerator::new(config.datacenter_id, config.worker_id);
    let addr = format!("0.0.0.0:{}", config.port);
    let state = AppState::new(store, codes, config);
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
