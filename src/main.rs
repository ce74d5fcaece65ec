//! MySlide Backend
//!
//! Content service for the agency site with SQLite document persistence.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use myslide_backend::config::{Config, LogFormat};
use myslide_backend::gateway::ContentGateway;
use myslide_backend::store::SqliteDocumentStore;
use myslide_backend::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let (json_layer, text_layer) = match config.log_format {
        LogFormat::Json => (Some(tracing_subscriber::fmt::layer().json()), None),
        LogFormat::Text => (None, Some(tracing_subscriber::fmt::layer())),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    tracing::info!("Starting MySlide Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Quote rotation: {:?}", config.quote_rotation);

    if config.admin_credentials.is_none() {
        tracing::warn!(
            "No admin credentials configured (MYSLIDE_ADMIN_USERNAME / MYSLIDE_ADMIN_PASSWORD). Admin login is disabled!"
        );
    }

    // Open the document store
    let store = SqliteDocumentStore::open(&config.db_path).await?;
    let gateway = ContentGateway::new(Arc::new(store));

    // Make sure the guidelines singleton exists before serving
    gateway.fetch_guidelines().await?;

    let bind_addr = config.bind_addr;
    let state = AppState::new(config, gateway);
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
