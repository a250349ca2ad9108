//! Order placement workflow
//!
//! Stock consumption is a precondition for committing an order: every line
//! item is consumed through the inventory service before the order row is
//! written, and any rejection aborts placement. Engine rejections keep their
//! original kind (missing product, insufficient stock, no batches) so the
//! caller can tell them apart; only transport-level failures against the
//! inventory service surface as a generic order processing error.
//!
//! Known gap, preserved from the reference behavior: line items consumed
//! before a failing one are NOT compensated with a replenish. A multi-item
//! order that fails partway leaves the earlier consumptions in place with no
//! order record. See DESIGN.md before relying on multi-item orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::InventoryClient;

/// Order service for the placement workflow
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
    inventory: InventoryClient,
}

/// Persisted order record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub customer_name: String,
    pub status: String,
    pub order_date: DateTime<Utc>,
}

/// One line item of an order request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Input for placing an order
#[derive(Debug, Deserialize)]
pub struct PlaceOrderInput {
    pub customer_name: String,
    pub items: Vec<OrderItemInput>,
}

/// Response for a placed order
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order_id: Uuid,
    pub status: String,
    pub order_date: DateTime<Utc>,
    pub customer_name: String,
    pub items: Vec<OrderItemInput>,
}

/// Validate an order request before any stock is touched
pub fn validate_order(input: &PlaceOrderInput) -> Result<(), AppError> {
    shared::validate_customer_name(&input.customer_name).map_err(|msg| AppError::Validation {
        field: "customer_name".to_string(),
        message: msg.to_string(),
    })?;

    if input.items.is_empty() {
        return Err(AppError::Validation {
            field: "items".to_string(),
            message: "Order must contain at least one item".to_string(),
        });
    }

    for item in &input.items {
        shared::validate_stock_quantity(item.quantity).map_err(|msg| AppError::Validation {
            field: "items.quantity".to_string(),
            message: msg.to_string(),
        })?;
    }

    Ok(())
}

/// Map a stock consumption failure for the order placement response.
///
/// Engine rejections pass through unchanged so their status codes and error
/// codes survive; only transport-level failures become a generic order
/// processing error.
pub fn consume_failure(err: AppError) -> AppError {
    match err {
        AppError::ExternalService(msg) => {
            AppError::OrderProcessing(format!("Failed to place order: {}", msg))
        }
        other => other,
    }
}

impl OrderService {
    /// Create a new OrderService instance
    pub fn new(db: PgPool, inventory: InventoryClient) -> Self {
        Self { db, inventory }
    }

    /// Place an order, consuming stock per line item first
    pub async fn place_order(&self, input: PlaceOrderInput) -> AppResult<OrderResponse> {
        validate_order(&input)?;

        // Consume stock before committing the order; a rejection here means
        // no order row is ever created
        for item in &input.items {
            self.inventory
                .consume_stock(item.product_id, item.quantity)
                .await
                .map_err(|err| {
                    tracing::warn!(
                        product_id = %item.product_id,
                        quantity = item.quantity,
                        error = %err,
                        "stock consumption failed, aborting order"
                    );
                    consume_failure(err)
                })?;
        }

        let mut tx = self.db.begin().await?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (customer_name, status)
            VALUES ($1, 'PLACED')
            RETURNING id, customer_name, status, order_date
            "#,
        )
        .bind(&input.customer_name)
        .fetch_one(&mut *tx)
        .await?;

        for item in &input.items {
            sqlx::query("INSERT INTO order_items (order_id, product_id, quantity) VALUES ($1, $2, $3)")
                .bind(order.id)
                .bind(item.product_id)
                .bind(item.quantity)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(order_id = %order.id, items = input.items.len(), "order placed");

        Ok(OrderResponse {
            order_id: order.id,
            status: order.status,
            order_date: order.order_date,
            customer_name: order.customer_name,
            items: input.items,
        })
    }

    /// Get an order with its items
    pub async fn get_order(&self, order_id: Uuid) -> AppResult<OrderResponse> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, customer_name, status, order_date FROM orders WHERE id = $1",
        )
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        let items = sqlx::query_as::<_, (Uuid, i32)>(
            "SELECT product_id, quantity FROM order_items WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_all(&self.db)
        .await?;

        Ok(OrderResponse {
            order_id: order.id,
            status: order.status,
            order_date: order.order_date,
            customer_name: order.customer_name,
            items: items
                .into_iter()
                .map(|(product_id, quantity)| OrderItemInput {
                    product_id,
                    quantity,
                })
                .collect(),
        })
    }
}
