//! HTTP client for the inventory service's stock mutation endpoint

use std::time::Duration;

use reqwest::{Client, StatusCode};
use shared::{ErrorEnvelope, InventoryUpdateRequest, StockAction};
use uuid::Uuid;

use crate::config::InventoryConfig;
use crate::error::{AppError, AppResult};

/// Typed client for the inventory service
#[derive(Clone)]
pub struct InventoryClient {
    client: Client,
    base_url: String,
}

impl InventoryClient {
    /// Create a client from configuration
    pub fn new(config: &InventoryConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Consume stock for a product; a non-success response maps onto the
    /// same error kinds the inventory service raised
    pub async fn consume_stock(&self, product_id: Uuid, quantity: i32) -> AppResult<()> {
        let request = InventoryUpdateRequest {
            product_id,
            quantity,
            action: StockAction::Consume,
        };

        let url = format!("{}/inventory/update", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // Recover the inventory service's error envelope where possible so
        // the caller sees the original failure kind
        let envelope = response.json::<ErrorEnvelope>().await.ok();
        let message = envelope
            .as_ref()
            .map(|e| e.error.message.clone())
            .unwrap_or_else(|| format!("inventory service returned {}", status));
        let code = envelope.map(|e| e.error.code).unwrap_or_default();

        Err(match status {
            StatusCode::NOT_FOUND => AppError::NotFound("Product".to_string()),
            StatusCode::BAD_REQUEST => AppError::Validation {
                field: "quantity".to_string(),
                message,
            },
            StatusCode::UNPROCESSABLE_ENTITY if code == "NO_BATCHES_AVAILABLE" => {
                AppError::NoBatchesAvailable(message)
            }
            StatusCode::UNPROCESSABLE_ENTITY => AppError::InsufficientStock(message),
            _ => AppError::ExternalService(message),
        })
    }
}
