//! FEFO stock allocation planner
//!
//! The planning step is a pure function over an already-ordered batch list:
//! it decides which batches change and what their new quantities are, but
//! performs no I/O. `InventoryService` loads the batches (ordered by
//! ascending expiry, NULL expiry last) inside a transaction, runs the
//! planner, and applies the resulting writes atomically. Keeping the
//! algorithm pure makes the stock invariants directly testable.

use shared::StockAction;
use uuid::Uuid;

use crate::services::batch::Batch;

/// A single planned quantity write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchUpdate {
    pub batch_id: Uuid,
    pub new_quantity: i32,
}

/// Why a mutation cannot be satisfied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// Requested quantity exceeds the total available across all batches.
    /// Computed before any write is planned, so a rejected consume changes
    /// nothing.
    InsufficientStock { requested: i32, available: i64 },
    /// Replenishment needs an existing batch to target
    NoBatches,
    /// Adding the requested quantity would overflow the target batch's
    /// stock counter
    QuantityOverflow,
}

/// Plan a stock mutation against the batches of one product.
///
/// `batches` must be ordered by ascending expiry date with absent expiry
/// dates sorting last; the first element is the next batch to expire.
/// `quantity` must already be validated as strictly positive.
pub fn plan(
    batches: &[Batch],
    action: StockAction,
    quantity: i32,
) -> Result<Vec<BatchUpdate>, AllocationError> {
    match action {
        StockAction::Consume => plan_consume(batches, quantity),
        StockAction::Replenish => plan_replenish(batches, quantity),
    }
}

/// Drain batches in FEFO order until the requested quantity is satisfied.
/// All-or-nothing: availability is checked up front and a shortfall plans
/// zero writes.
fn plan_consume(batches: &[Batch], quantity: i32) -> Result<Vec<BatchUpdate>, AllocationError> {
    let available: i64 = batches.iter().map(|b| i64::from(b.quantity)).sum();
    if available < i64::from(quantity) {
        return Err(AllocationError::InsufficientStock {
            requested: quantity,
            available,
        });
    }

    let mut updates = Vec::new();
    let mut remaining = quantity;

    for batch in batches {
        // Empty batches are skipped without a write
        if batch.quantity == 0 {
            continue;
        }

        if remaining <= batch.quantity {
            updates.push(BatchUpdate {
                batch_id: batch.id,
                new_quantity: batch.quantity - remaining,
            });
            return Ok(updates);
        }

        updates.push(BatchUpdate {
            batch_id: batch.id,
            new_quantity: 0,
        });
        remaining -= batch.quantity;
    }

    // Unreachable when the availability check passed; kept as a guard so a
    // broken ordering contract cannot silently under-consume.
    Err(AllocationError::InsufficientStock {
        requested: quantity,
        available,
    })
}

/// Replenishment targets the earliest-expiry batch. A product with no
/// batches is rejected; the engine never creates batches implicitly.
fn plan_replenish(batches: &[Batch], quantity: i32) -> Result<Vec<BatchUpdate>, AllocationError> {
    let target = batches.first().ok_or(AllocationError::NoBatches)?;
    let new_quantity = target
        .quantity
        .checked_add(quantity)
        .ok_or(AllocationError::QuantityOverflow)?;
    Ok(vec![BatchUpdate {
        batch_id: target.id,
        new_quantity,
    }])
}
