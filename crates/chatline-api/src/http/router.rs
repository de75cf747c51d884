//! Axum router configuration with middleware.
//!
//! Middleware: CORS (any origin), request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Identity
        .route("/register", post(handlers::identity::register))
        .route("/login", post(handlers::identity::login))
        .route("/verify-contact", post(handlers::identity::verify_contact))
        // Conversations
        .route("/chat-history", get(handlers::conversation::chat_history))
        .route("/contact-list", get(handlers::conversation::contact_list))
        .route("/send-message", post(handlers::conversation::send_message))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
