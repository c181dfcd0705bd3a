//! Batch order coordination
//!
//! Drives the fulfillment engine over a list of orders. Every order gets an
//! individual accept/reject outcome; a business rejection never aborts the
//! rest of the batch, only infrastructure failures do. After the whole list
//! is processed, accepted orders are closed.

use shared::models::{BatchAccumulator, BatchOrderStatus, BatchOrdersResponse, OrderDraft};
use sqlx::PgPool;

use crate::db::orders::{self, CloseOutcome};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Process a batch of orders, one at a time in submission order.
pub async fn place_all(
    pool: &PgPool,
    drafts: Vec<OrderDraft>,
) -> Result<BatchOrdersResponse, BoxError> {
    let mut acc = BatchAccumulator::new();

    for draft in &drafts {
        let placed = orders::place_order(pool, draft).await?;
        if placed.info.status == BatchOrderStatus::Rejected {
            tracing::warn!(
                customer = %placed.info.customer_name,
                reason = %placed.info.reason,
                "Order rejected in batch"
            );
        }
        acc.record(placed.info, placed.updates);
    }

    // Accepted orders are closed once the whole list has been processed.
    // An order that vanished in the meantime is skipped; anything else is
    // an infrastructure failure for the batch.
    for &order_id in acc.accepted_order_ids() {
        match orders::close_order(pool, order_id).await? {
            CloseOutcome::Closed => {}
            CloseOutcome::NotFound => {
                tracing::warn!(order_id, "Accepted order disappeared before closing");
            }
            CloseOutcome::AlreadyClosed => {
                return Err(format!("order {order_id} was closed concurrently").into());
            }
        }
    }

    Ok(acc.finish())
}
