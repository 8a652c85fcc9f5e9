// ============================================================================
// Axum Routes Module
// ============================================================================
//
// Structure:
// - mod.rs: Main router assembly and middleware
// - health.rs: Root welcome and health check endpoints
// - messages.rs: Message CRUD and reorder endpoints
// - middleware.rs: Request logging
//
// ============================================================================

mod health;
mod messages;
mod middleware;

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::context::AppContext;

/// Create the main application router with all routes
pub fn create_router(app_context: Arc<AppContext>) -> Router {
    let cors = cors_layer(&app_context.config);

    let messages_routes = Router::new()
        .route(
            "/",
            get(messages::list_messages).post(messages::create_message),
        )
        .route("/reorder", post(messages::reorder_messages))
        .route(
            "/:id",
            put(messages::update_message).delete(messages::delete_message),
        );

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .nest("/messages", messages_routes)
        // Apply middleware (order matters - last added runs first)
        .layer(
            ServiceBuilder::new()
                // Tracing layer (outermost - runs first)
                .layer(TraceLayer::new_for_http())
                // Request logging
                .layer(axum::middleware::from_fn(middleware::request_logging))
                .layer(cors)
                .into_inner(),
        )
        .with_state(app_context)
}

/// Build the CORS layer from configuration.
/// An empty origin list allows any origin (local frontend development).
fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
