//! Allocation planner tests
//!
//! Exercises the FEFO planning algorithm directly:
//! - batches drain in expiry order, zero-quantity batches skipped
//! - consume is all-or-nothing: a shortfall plans zero writes
//! - replenish targets the earliest-expiry batch and needs one to exist
//! - planned quantities are never negative and conserve total stock

use chrono::{Duration, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use batchtrack_inventory::services::allocation::{plan, AllocationError, BatchUpdate};
use batchtrack_inventory::services::batch::Batch;
use shared::StockAction;

/// Build a batch expiring `days` from today, or undated when `days` is None
fn batch(days: Option<i64>, quantity: i32) -> Batch {
    Batch {
        id: Uuid::new_v4(),
        product_id: Uuid::new_v4(),
        batch_number: "B".to_string(),
        expiry_date: days.map(|d| Utc::now().date_naive() + Duration::days(d)),
        quantity,
        created_at: Utc::now(),
    }
}

/// Apply planned updates to a copy of the batch list
fn apply(batches: &[Batch], updates: &[BatchUpdate]) -> Vec<i32> {
    batches
        .iter()
        .map(|b| {
            updates
                .iter()
                .find(|u| u.batch_id == b.id)
                .map(|u| u.new_quantity)
                .unwrap_or(b.quantity)
        })
        .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn consume_drains_batches_in_fefo_order() {
    let batches = vec![batch(Some(1), 3), batch(Some(2), 4)];

    let updates = plan(&batches, StockAction::Consume, 5).unwrap();

    assert_eq!(apply(&batches, &updates), vec![0, 2]);
}

#[test]
fn consume_skips_zero_quantity_batches() {
    let batches = vec![batch(Some(1), 3), batch(Some(2), 4), batch(Some(3), 0)];

    let updates = plan(&batches, StockAction::Consume, 5).unwrap();

    // earliest batch drained, second partially consumed, empty batch untouched
    assert_eq!(apply(&batches, &updates), vec![0, 2, 0]);
    assert_eq!(updates.len(), 2);
    assert!(updates.iter().all(|u| u.batch_id != batches[2].id));
}

#[test]
fn consume_exactly_one_batch_stops_there() {
    let batches = vec![batch(Some(1), 3), batch(Some(2), 4)];

    let updates = plan(&batches, StockAction::Consume, 3).unwrap();

    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].batch_id, batches[0].id);
    assert_eq!(updates[0].new_quantity, 0);
}

#[test]
fn consume_reaches_undated_batches_last() {
    // undated batches sort after all dated ones per the store's ordering
    let batches = vec![batch(Some(1), 1), batch(None, 5)];

    let updates = plan(&batches, StockAction::Consume, 3).unwrap();

    assert_eq!(apply(&batches, &updates), vec![0, 3]);
}

#[test]
fn consume_rejects_shortfall_without_writes() {
    let batches = vec![batch(Some(1), 2)];

    let err = plan(&batches, StockAction::Consume, 5).unwrap_err();

    assert_eq!(
        err,
        AllocationError::InsufficientStock {
            requested: 5,
            available: 2,
        }
    );
}

#[test]
fn consume_rejects_empty_batch_list() {
    let err = plan(&[], StockAction::Consume, 1).unwrap_err();

    assert_eq!(
        err,
        AllocationError::InsufficientStock {
            requested: 1,
            available: 0,
        }
    );
}

#[test]
fn replenish_targets_earliest_expiry_batch() {
    let batches = vec![batch(Some(1), 2), batch(Some(2), 5)];

    let updates = plan(&batches, StockAction::Replenish, 3).unwrap();

    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].batch_id, batches[0].id);
    assert_eq!(updates[0].new_quantity, 5);
    assert_eq!(apply(&batches, &updates), vec![5, 5]);
}

#[test]
fn replenish_without_batches_fails() {
    let err = plan(&[], StockAction::Replenish, 1).unwrap_err();

    assert_eq!(err, AllocationError::NoBatches);
}

#[test]
fn replenish_overflowing_stock_counter_is_rejected() {
    let batches = vec![batch(Some(1), i32::MAX), batch(Some(2), 5)];

    let err = plan(&batches, StockAction::Replenish, 1).unwrap_err();

    assert_eq!(err, AllocationError::QuantityOverflow);
}

#[test]
fn replenish_up_to_stock_counter_limit_succeeds() {
    let batches = vec![batch(Some(1), i32::MAX - 3)];

    let updates = plan(&batches, StockAction::Replenish, 3).unwrap();

    assert_eq!(updates[0].new_quantity, i32::MAX);
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Planned quantities are never negative, regardless of batch layout
    #[test]
    fn planned_quantities_never_negative(
        quantities in prop::collection::vec(0..1000i32, 0..12),
        requested in 1..5000i32,
    ) {
        let batches: Vec<Batch> = quantities
            .iter()
            .enumerate()
            .map(|(i, &q)| batch(Some(i as i64), q))
            .collect();

        if let Ok(updates) = plan(&batches, StockAction::Consume, requested) {
            prop_assert!(updates.iter().all(|u| u.new_quantity >= 0));
        }
    }

    /// A successful consume removes exactly the requested quantity and
    /// touches only the FEFO-selected prefix of non-empty batches
    #[test]
    fn consume_conserves_stock(
        quantities in prop::collection::vec(0..1000i32, 1..12),
        requested in 1..5000i32,
    ) {
        let batches: Vec<Batch> = quantities
            .iter()
            .enumerate()
            .map(|(i, &q)| batch(Some(i as i64), q))
            .collect();
        let total: i64 = quantities.iter().map(|&q| i64::from(q)).sum();

        match plan(&batches, StockAction::Consume, requested) {
            Ok(updates) => {
                prop_assert!(i64::from(requested) <= total);

                let after = apply(&batches, &updates);
                let new_total: i64 = after.iter().map(|&q| i64::from(q)).sum();
                prop_assert_eq!(new_total, total - i64::from(requested));

                // every planned write except the last empties its batch
                for u in &updates[..updates.len().saturating_sub(1)] {
                    prop_assert_eq!(u.new_quantity, 0);
                }
            }
            Err(AllocationError::InsufficientStock { available, .. }) => {
                prop_assert_eq!(available, total);
                prop_assert!(i64::from(requested) > total);
            }
            Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }

    /// Replenish adds exactly the requested quantity to the first batch and
    /// changes nothing else; sums past the stock counter limit are rejected
    /// instead of wrapping
    #[test]
    fn replenish_adds_to_first_batch_only(
        quantities in prop::collection::vec(0..=i32::MAX, 1..12),
        added in 1..=i32::MAX,
    ) {
        let batches: Vec<Batch> = quantities
            .iter()
            .enumerate()
            .map(|(i, &q)| batch(Some(i as i64), q))
            .collect();

        match plan(&batches, StockAction::Replenish, added) {
            Ok(updates) => {
                prop_assert_eq!(updates.len(), 1);
                prop_assert_eq!(updates[0].batch_id, batches[0].id);
                prop_assert_eq!(Some(updates[0].new_quantity), quantities[0].checked_add(added));
            }
            Err(AllocationError::QuantityOverflow) => {
                prop_assert!(quantities[0].checked_add(added).is_none());
            }
            Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }
}
