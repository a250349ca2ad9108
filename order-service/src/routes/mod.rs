//! Route definitions for the order service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Order placement
        .nest("/orders", order_routes())
}

/// Order management routes
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_order))
        .route("/:order_id", get(handlers::get_order))
}
