//! Inventory service: the allocation engine's storage-facing half
//!
//! The read-check-write sequence for a stock mutation runs inside a single
//! transaction holding `FOR UPDATE` row locks on the product's batches, so
//! two concurrent mutations of the same product serialize instead of both
//! passing the availability check on stale totals.

use shared::{BatchView, InventoryUpdateRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::allocation::{self, AllocationError};
use crate::services::batch::Batch;

/// Inventory service for FEFO stock mutations and batch listings
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

const ORDERED_BATCHES_FOR_UPDATE: &str = r#"
    SELECT id, product_id, batch_number, expiry_date, quantity, created_at
    FROM batches
    WHERE product_id = $1
    ORDER BY expiry_date ASC NULLS LAST, id ASC
    FOR UPDATE
"#;

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List the batches of a product ordered by ascending expiry date,
    /// batches without an expiry date last
    pub async fn get_batches(&self, product_id: Uuid) -> AppResult<Vec<BatchView>> {
        let product_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&self.db)
                .await?;

        if !product_exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let batches = sqlx::query_as::<_, Batch>(
            r#"
            SELECT id, product_id, batch_number, expiry_date, quantity, created_at
            FROM batches
            WHERE product_id = $1
            ORDER BY expiry_date ASC NULLS LAST, id ASC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        Ok(batches
            .into_iter()
            .map(|b| BatchView {
                batch_id: b.id,
                batch_number: b.batch_number,
                expiry_date: b.expiry_date,
                quantity: b.quantity,
            })
            .collect())
    }

    /// Apply a stock mutation under FEFO allocation.
    ///
    /// Validation happens before any store access; on any failure path zero
    /// batch writes have occurred.
    pub async fn update_stock(&self, request: InventoryUpdateRequest) -> AppResult<()> {
        shared::validate_stock_quantity(request.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;

        let mut tx = self.db.begin().await?;

        let product_name =
            sqlx::query_scalar::<_, String>("SELECT name FROM products WHERE id = $1")
                .bind(request.product_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let batches = sqlx::query_as::<_, Batch>(ORDERED_BATCHES_FOR_UPDATE)
            .bind(request.product_id)
            .fetch_all(&mut *tx)
            .await?;

        let updates = allocation::plan(&batches, request.action, request.quantity)
            .map_err(|err| allocation_error(err, &product_name))?;

        for update in &updates {
            sqlx::query("UPDATE batches SET quantity = $1 WHERE id = $2")
                .bind(update.new_quantity)
                .bind(update.batch_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            product_id = %request.product_id,
            action = request.action.as_str(),
            quantity = request.quantity,
            batches_touched = updates.len(),
            "stock mutation applied"
        );

        Ok(())
    }
}

fn allocation_error(err: AllocationError, product_name: &str) -> AppError {
    match err {
        AllocationError::InsufficientStock {
            requested,
            available,
        } => AppError::InsufficientStock(format!(
            "Insufficient stock for product '{}': requested {}, available {}",
            product_name, requested, available
        )),
        AllocationError::NoBatches => AppError::NoBatchesAvailable(format!(
            "Product '{}' has no batches to replenish",
            product_name
        )),
        AllocationError::QuantityOverflow => AppError::Validation {
            field: "quantity".to_string(),
            message: format!(
                "Replenish quantity overflows the stock counter for product '{}'",
                product_name
            ),
        },
    }
}
