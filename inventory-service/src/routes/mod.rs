//! Route definitions for the inventory service

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
        // Product management
        .nest("/products", product_routes())
        // Batch management
        .nest("/batches", batch_routes())
        // Stock allocation
        .nest("/inventory", inventory_routes())
}

/// Product management routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
}

/// Batch management routes
fn batch_routes() -> Router<AppState> {
    Router::new().route("/", post(handlers::create_batch)).route(
        "/:batch_id",
        get(handlers::get_batch)
            .put(handlers::update_batch)
            .delete(handlers::delete_batch),
    )
}

/// Stock allocation routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/:product_id", get(handlers::get_product_batches))
        .route("/update", post(handlers::update_stock))
}
