//! Product management service
//!
//! Products are identity plus SKU; all stock lives in batches. Deleting a
//! product cascade-deletes its batches at the store level.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{map_unique_violation, AppError, AppResult};

/// Product service for basic product CRUD
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Product record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub sku: String,
    pub name: String,
}

/// Input for updating a product
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub sku: String,
    pub name: String,
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a product
    pub async fn create(&self, input: CreateProductInput) -> AppResult<Product> {
        shared::validate_sku(&input.sku).map_err(|msg| AppError::Validation {
            field: "sku".to_string(),
            message: msg.to_string(),
        })?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (sku, name)
            VALUES ($1, $2)
            RETURNING id, sku, name, created_at
            "#,
        )
        .bind(&input.sku)
        .bind(&input.name)
        .fetch_one(&self.db)
        .await
        .map_err(|err| map_unique_violation(err, "sku"))?;

        Ok(product)
    }

    /// Update a product's name and SKU
    pub async fn update(&self, product_id: Uuid, input: UpdateProductInput) -> AppResult<Product> {
        shared::validate_sku(&input.sku).map_err(|msg| AppError::Validation {
            field: "sku".to_string(),
            message: msg.to_string(),
        })?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET sku = $1, name = $2
            WHERE id = $3
            RETURNING id, sku, name, created_at
            "#,
        )
        .bind(&input.sku)
        .bind(&input.name)
        .bind(product_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|err| map_unique_violation(err, "sku"))?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(product)
    }

    /// Delete a product and, via the store's cascade, its batches
    pub async fn delete(&self, product_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }

    /// Get a product by id
    pub async fn get_by_id(&self, product_id: Uuid) -> AppResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, sku, name, created_at FROM products WHERE id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(product)
    }

    /// List all products
    pub async fn list(&self) -> AppResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, sku, name, created_at FROM products ORDER BY created_at",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }
}
