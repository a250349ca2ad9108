//! Order workflow tests
//!
//! Covers request validation (the checks that run before any stock is
//! touched) and the wire shape of order requests and responses.

use proptest::prelude::*;
use uuid::Uuid;

use batchtrack_orders::error::AppError;
use batchtrack_orders::services::order::{
    consume_failure, validate_order, OrderItemInput, PlaceOrderInput,
};

fn order(customer: &str, quantities: &[i32]) -> PlaceOrderInput {
    PlaceOrderInput {
        customer_name: customer.to_string(),
        items: quantities
            .iter()
            .map(|&q| OrderItemInput {
                product_id: Uuid::new_v4(),
                quantity: q,
            })
            .collect(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn valid_order_passes_validation() {
    assert!(validate_order(&order("Ada Lovelace", &[1, 20, 3])).is_ok());
}

#[test]
fn empty_item_list_is_rejected() {
    let err = validate_order(&order("Ada Lovelace", &[])).unwrap_err();
    assert!(matches!(err, AppError::Validation { field, .. } if field == "items"));
}

#[test]
fn blank_customer_name_is_rejected() {
    let err = validate_order(&order("   ", &[1])).unwrap_err();
    assert!(matches!(err, AppError::Validation { field, .. } if field == "customer_name"));
}

#[test]
fn non_positive_item_quantity_is_rejected() {
    for bad in [0, -1, -100] {
        let err = validate_order(&order("Ada Lovelace", &[2, bad])).unwrap_err();
        assert!(matches!(err, AppError::Validation { field, .. } if field == "items.quantity"));
    }
}

#[test]
fn order_request_deserializes_from_wire_shape() {
    let json = r#"{
        "customer_name": "Grace Hopper",
        "items": [
            {"product_id": "c56a4180-65aa-42ec-a945-5fd21dec0538", "quantity": 2}
        ]
    }"#;

    let input: PlaceOrderInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.customer_name, "Grace Hopper");
    assert_eq!(input.items.len(), 1);
    assert_eq!(input.items[0].quantity, 2);
}

#[test]
fn order_request_without_items_field_fails_to_parse() {
    let json = r#"{"customer_name": "Grace Hopper"}"#;
    assert!(serde_json::from_str::<PlaceOrderInput>(json).is_err());
}

#[test]
fn stock_rejections_keep_their_kind_when_placement_aborts() {
    let not_found = consume_failure(AppError::NotFound("Product".to_string()));
    assert!(matches!(not_found, AppError::NotFound(resource) if resource == "Product"));

    let short = consume_failure(AppError::InsufficientStock("coffee".to_string()));
    assert!(matches!(short, AppError::InsufficientStock(_)));

    let empty = consume_failure(AppError::NoBatchesAvailable("coffee".to_string()));
    assert!(matches!(empty, AppError::NoBatchesAvailable(_)));

    let invalid = consume_failure(AppError::Validation {
        field: "quantity".to_string(),
        message: "must be positive".to_string(),
    });
    assert!(matches!(invalid, AppError::Validation { field, .. } if field == "quantity"));
}

#[test]
fn transport_failure_becomes_order_processing_error() {
    let err = consume_failure(AppError::ExternalService("connection refused".to_string()));
    match err {
        AppError::OrderProcessing(msg) => {
            assert!(msg.contains("Failed to place order"));
            assert!(msg.contains("connection refused"));
        }
        other => panic!("expected OrderProcessing, got {:?}", other),
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Validation accepts exactly the orders where every quantity is positive
    #[test]
    fn validation_matches_quantity_signs(
        quantities in prop::collection::vec(-5..50i32, 1..8),
    ) {
        let input = order("Ada Lovelace", &quantities);
        let all_positive = quantities.iter().all(|&q| q > 0);
        prop_assert_eq!(validate_order(&input).is_ok(), all_positive);
    }
}
