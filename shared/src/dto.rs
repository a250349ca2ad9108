//! Wire DTOs exchanged between the inventory and order services

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a stock mutation.
///
/// The wire format also accepts the legacy action strings `DECREMENT` and
/// `INCREMENT`; anything else fails deserialization and is rejected as a
/// validation error at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockAction {
    #[serde(alias = "DECREMENT")]
    Consume,
    #[serde(alias = "INCREMENT")]
    Replenish,
}

impl StockAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockAction::Consume => "CONSUME",
            StockAction::Replenish => "REPLENISH",
        }
    }
}

/// Request body for `POST /inventory/update`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryUpdateRequest {
    pub product_id: Uuid,
    pub quantity: i32,
    pub action: StockAction,
}

/// Success envelope for stock mutations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryUpdateResponse {
    pub success: bool,
    pub message: String,
}

/// One batch of a product as returned by `GET /inventory/{product_id}`,
/// ordered by ascending expiry date (batches without an expiry sort last)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchView {
    pub batch_id: Uuid,
    pub batch_number: String,
    pub expiry_date: Option<NaiveDate>,
    pub quantity: i32,
}

/// Error envelope produced by both services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_accepts_legacy_strings() {
        let consume: StockAction = serde_json::from_str("\"DECREMENT\"").unwrap();
        assert_eq!(consume, StockAction::Consume);

        let replenish: StockAction = serde_json::from_str("\"INCREMENT\"").unwrap();
        assert_eq!(replenish, StockAction::Replenish);
    }

    #[test]
    fn action_accepts_canonical_strings() {
        let consume: StockAction = serde_json::from_str("\"CONSUME\"").unwrap();
        assert_eq!(consume, StockAction::Consume);

        let replenish: StockAction = serde_json::from_str("\"REPLENISH\"").unwrap();
        assert_eq!(replenish, StockAction::Replenish);
    }

    #[test]
    fn action_rejects_unknown_strings() {
        assert!(serde_json::from_str::<StockAction>("\"DESTROY\"").is_err());
    }

    #[test]
    fn update_request_round_trips() {
        let req = InventoryUpdateRequest {
            product_id: Uuid::new_v4(),
            quantity: 5,
            action: StockAction::Consume,
        };
        let json = serde_json::to_string(&req).unwrap();
        let back: InventoryUpdateRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.product_id, req.product_id);
        assert_eq!(back.quantity, 5);
        assert_eq!(back.action, StockAction::Consume);
    }
}
