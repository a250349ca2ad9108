//! Batch management service for batch intake and corrective edits
//!
//! Batches are created and deleted here; the allocation engine only ever
//! adjusts quantities on existing batches.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{map_foreign_key_violation, AppError, AppResult};

/// Batch service for managing dated stock batches
#[derive(Clone)]
pub struct BatchService {
    db: PgPool,
}

/// A quantity of a single product tagged with an expiry date
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Batch {
    pub id: Uuid,
    pub product_id: Uuid,
    pub batch_number: String,
    pub expiry_date: Option<NaiveDate>,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a batch
#[derive(Debug, Deserialize)]
pub struct CreateBatchInput {
    pub product_id: Uuid,
    pub batch_number: String,
    pub expiry_date: Option<NaiveDate>,
    pub quantity: Option<i32>,
}

/// Input for updating a batch
#[derive(Debug, Deserialize)]
pub struct UpdateBatchInput {
    pub batch_number: String,
    pub expiry_date: Option<NaiveDate>,
    pub quantity: i32,
    /// Reassign the batch to another product; the target must exist
    pub product_id: Option<Uuid>,
}

impl BatchService {
    /// Create a new BatchService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a batch for an existing product
    pub async fn create(&self, input: CreateBatchInput) -> AppResult<Batch> {
        if input.batch_number.trim().is_empty() {
            return Err(AppError::Validation {
                field: "batch_number".to_string(),
                message: "Batch number cannot be empty".to_string(),
            });
        }

        let quantity = input.quantity.unwrap_or(0);
        if quantity < 0 {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: "Quantity cannot be negative".to_string(),
            });
        }

        let product_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(input.product_id)
                .fetch_one(&self.db)
                .await?;

        if !product_exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let batch = sqlx::query_as::<_, Batch>(
            r#"
            INSERT INTO batches (product_id, batch_number, expiry_date, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING id, product_id, batch_number, expiry_date, quantity, created_at
            "#,
        )
        .bind(input.product_id)
        .bind(&input.batch_number)
        .bind(input.expiry_date)
        .bind(quantity)
        .fetch_one(&self.db)
        .await
        .map_err(|err| map_foreign_key_violation(err, "Product"))?;

        Ok(batch)
    }

    /// Update a batch, optionally reassigning it to another product
    pub async fn update(&self, batch_id: Uuid, input: UpdateBatchInput) -> AppResult<Batch> {
        if input.quantity < 0 {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: "Quantity cannot be negative".to_string(),
            });
        }

        let existing = sqlx::query_as::<_, Batch>(
            "SELECT id, product_id, batch_number, expiry_date, quantity, created_at FROM batches WHERE id = $1",
        )
        .bind(batch_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Batch".to_string()))?;

        let product_id = match input.product_id {
            Some(new_product_id) => {
                let product_exists = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)",
                )
                .bind(new_product_id)
                .fetch_one(&self.db)
                .await?;

                if !product_exists {
                    return Err(AppError::NotFound("Product".to_string()));
                }
                new_product_id
            }
            None => existing.product_id,
        };

        let batch = sqlx::query_as::<_, Batch>(
            r#"
            UPDATE batches
            SET product_id = $1, batch_number = $2, expiry_date = $3, quantity = $4
            WHERE id = $5
            RETURNING id, product_id, batch_number, expiry_date, quantity, created_at
            "#,
        )
        .bind(product_id)
        .bind(&input.batch_number)
        .bind(input.expiry_date)
        .bind(input.quantity)
        .bind(batch_id)
        .fetch_one(&self.db)
        .await
        .map_err(|err| map_foreign_key_violation(err, "Product"))?;

        Ok(batch)
    }

    /// Delete a batch
    pub async fn delete(&self, batch_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM batches WHERE id = $1")
            .bind(batch_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Batch".to_string()));
        }

        Ok(())
    }

    /// Get a batch by id
    pub async fn get_by_id(&self, batch_id: Uuid) -> AppResult<Batch> {
        let batch = sqlx::query_as::<_, Batch>(
            "SELECT id, product_id, batch_number, expiry_date, quantity, created_at FROM batches WHERE id = $1",
        )
        .bind(batch_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Batch".to_string()))?;

        Ok(batch)
    }
}
