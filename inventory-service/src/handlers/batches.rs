//! HTTP handlers for batch management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::batch::{Batch, BatchService, CreateBatchInput, UpdateBatchInput};
use crate::AppState;

/// Get a batch by id
pub async fn get_batch(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
) -> AppResult<Json<Batch>> {
    let service = BatchService::new(state.db);
    let batch = service.get_by_id(batch_id).await?;
    Ok(Json(batch))
}

/// Create a batch for an existing product
pub async fn create_batch(
    State(state): State<AppState>,
    Json(input): Json<CreateBatchInput>,
) -> AppResult<(StatusCode, Json<Batch>)> {
    let service = BatchService::new(state.db);
    let batch = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(batch)))
}

/// Update a batch
pub async fn update_batch(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
    Json(input): Json<UpdateBatchInput>,
) -> AppResult<Json<Batch>> {
    let service = BatchService::new(state.db);
    let batch = service.update(batch_id, input).await?;
    Ok(Json(batch))
}

/// Delete a batch
pub async fn delete_batch(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    let service = BatchService::new(state.db);
    service.delete(batch_id).await?;
    Ok(Json(json!({ "success": true })))
}
