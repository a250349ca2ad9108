//! HTTP handlers for stock mutation and batch listing endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use shared::{BatchView, InventoryUpdateRequest, InventoryUpdateResponse};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::InventoryService;
use crate::AppState;

/// List a product's batches ordered by ascending expiry date
pub async fn get_product_batches(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Vec<BatchView>>> {
    let service = InventoryService::new(state.db);
    let batches = service.get_batches(product_id).await?;
    Ok(Json(batches))
}

/// Apply a stock mutation (consume or replenish) under FEFO allocation
pub async fn update_stock(
    State(state): State<AppState>,
    Json(request): Json<InventoryUpdateRequest>,
) -> AppResult<Json<InventoryUpdateResponse>> {
    let service = InventoryService::new(state.db);
    service.update_stock(request).await?;
    Ok(Json(InventoryUpdateResponse {
        success: true,
        message: "Inventory updated successfully".to_string(),
    }))
}
