// ============================================================================
// Message API Server
// ============================================================================
//
// REST backend for an ordered list of text messages.
// Handles:
// - Listing messages (GET /messages/)
// - Creating messages (POST /messages/)
// - Updating message content (PUT /messages/:id)
// - Deleting messages (DELETE /messages/:id)
// - Bulk reordering (POST /messages/reorder)
//
// ============================================================================

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use message_api::config::Config;
use message_api::context::AppContext;
use message_api::db;
use message_api::routes::create_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;
    let config = Arc::new(config);

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.rust_log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("=== Message API Server Starting ===");
    info!("Port: {}", config.port);

    // Initialize database
    info!("Connecting to database...");
    let db_pool = Arc::new(
        db::create_pool(&config)
            .await
            .context("Failed to connect to database")?,
    );
    info!("Connected to database");

    db::init_schema(&db_pool)
        .await
        .context("Failed to initialize database schema")?;
    info!("Database schema initialized");

    // Create application context
    let app_context = Arc::new(AppContext::new(db_pool, config.clone()));

    // Create router
    let app = create_router(app_context);

    // Start server
    let addr: SocketAddr = format!("0.0.0.0:{}", config.port)
        .parse()
        .context("Failed to parse bind address")?;

    info!("Message API Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
