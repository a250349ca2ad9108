//! HTTP handlers for order placement endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::order::{OrderResponse, OrderService, PlaceOrderInput};
use crate::AppState;

/// Place an order
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<PlaceOrderInput>,
) -> AppResult<(StatusCode, Json<OrderResponse>)> {
    let service = OrderService::new(state.db, state.inventory);
    let response = service.place_order(input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get an order with its items
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<OrderResponse>> {
    let service = OrderService::new(state.db, state.inventory);
    let response = service.get_order(order_id).await?;
    Ok(Json(response))
}
