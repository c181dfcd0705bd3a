//! Batch order processing aggregates
//!
//! Response-only types produced by the fulfillment engine and the batch
//! coordinator; none of these are persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-order verdict inside a batch (and for single placement)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchOrderStatus {
    Accepted,
    Rejected,
}

/// Outcome of running one order through the fulfillment engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOrderInfo {
    pub order_id: i64,
    pub customer_name: String,
    pub status: BatchOrderStatus,
    /// Human-readable acceptance/rejection reason ("OK" when accepted)
    pub reason: String,
    /// Monetary total of the order; 0 when rejected
    pub total: f64,
}

/// Stock consumed from one ingredient by an accepted order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOrderInventoryUpdate {
    pub ingredient_id: i64,
    pub name: String,
    pub quantity_used: f64,
    /// Stock left after the most recent order that consumed this ingredient.
    /// When several orders in one batch touch the same ingredient this is
    /// last-write-wins; `quantity_used` summation is the contract.
    pub remaining: f64,
}

/// Aggregate counters over a whole batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOrderSummary {
    pub total_orders: u32,
    pub accepted: u32,
    pub rejected: u32,
    pub total_revenue: f64,
    /// One entry per distinct ingredient consumed, ascending by ingredient id
    pub inventory_updates: Vec<BatchOrderInventoryUpdate>,
}

/// Full batch submission response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOrdersResponse {
    /// One entry per submitted order, in submission order
    pub processed_orders: Vec<BatchOrderInfo>,
    pub summary: BatchOrderSummary,
}

/// Accumulates per-order engine outcomes into a [`BatchOrdersResponse`].
///
/// Pure bookkeeping; the coordinator feeds it one outcome per order and
/// reads back the accepted order ids for the closing pass.
#[derive(Debug, Default)]
pub struct BatchAccumulator {
    processed: Vec<BatchOrderInfo>,
    accepted_ids: Vec<i64>,
    accepted: u32,
    rejected: u32,
    revenue: f64,
    merged: BTreeMap<i64, BatchOrderInventoryUpdate>,
}

impl BatchAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one order's outcome and its inventory consumption.
    pub fn record(&mut self, info: BatchOrderInfo, updates: Vec<BatchOrderInventoryUpdate>) {
        match info.status {
            BatchOrderStatus::Accepted => {
                self.accepted += 1;
                self.revenue += info.total;
                self.accepted_ids.push(info.order_id);
            }
            BatchOrderStatus::Rejected => self.rejected += 1,
        }
        for update in updates {
            self.merged
                .entry(update.ingredient_id)
                .and_modify(|merged| {
                    merged.quantity_used += update.quantity_used;
                    merged.remaining = update.remaining;
                })
                .or_insert(update);
        }
        self.processed.push(info);
    }

    /// Orders accepted so far, in submission order.
    pub fn accepted_order_ids(&self) -> &[i64] {
        &self.accepted_ids
    }

    pub fn finish(self) -> BatchOrdersResponse {
        BatchOrdersResponse {
            summary: BatchOrderSummary {
                total_orders: self.processed.len() as u32,
                accepted: self.accepted,
                rejected: self.rejected,
                total_revenue: self.revenue,
                inventory_updates: self.merged.into_values().collect(),
            },
            processed_orders: self.processed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted(order_id: i64, total: f64) -> BatchOrderInfo {
        BatchOrderInfo {
            order_id,
            customer_name: format!("customer-{order_id}"),
            status: BatchOrderStatus::Accepted,
            reason: "OK".to_string(),
            total,
        }
    }

    fn rejected(order_id: i64, reason: &str) -> BatchOrderInfo {
        BatchOrderInfo {
            order_id,
            customer_name: format!("customer-{order_id}"),
            status: BatchOrderStatus::Rejected,
            reason: reason.to_string(),
            total: 0.0,
        }
    }

    fn update(ingredient_id: i64, used: f64, remaining: f64) -> BatchOrderInventoryUpdate {
        BatchOrderInventoryUpdate {
            ingredient_id,
            name: format!("ingredient-{ingredient_id}"),
            quantity_used: used,
            remaining,
        }
    }

    #[test]
    fn counts_and_revenue() {
        let mut acc = BatchAccumulator::new();
        acc.record(accepted(1, 12.0), vec![]);
        acc.record(rejected(2, "insufficient inventory"), vec![]);
        acc.record(accepted(3, 5.5), vec![]);

        let response = acc.finish();
        assert_eq!(response.summary.total_orders, 3);
        assert_eq!(response.summary.accepted, 2);
        assert_eq!(response.summary.rejected, 1);
        assert_eq!(response.summary.total_revenue, 17.5);
        assert_eq!(response.processed_orders.len(), 3);
    }

    #[test]
    fn revenue_sums_only_accepted_totals() {
        let mut acc = BatchAccumulator::new();
        acc.record(accepted(1, 10.0), vec![]);
        // A rejected info always carries total 0, but the accumulator must
        // not rely on that.
        let mut bad = rejected(2, "nope");
        bad.total = 99.0;
        acc.record(bad, vec![]);

        assert_eq!(acc.finish().summary.total_revenue, 10.0);
    }

    #[test]
    fn merges_consumption_by_ingredient() {
        let mut acc = BatchAccumulator::new();
        acc.record(accepted(1, 1.0), vec![update(5, 2.0, 8.0)]);
        acc.record(accepted(2, 1.0), vec![update(5, 3.0, 5.0), update(2, 1.5, 0.5)]);

        let updates = acc.finish().summary.inventory_updates;
        assert_eq!(updates.len(), 2);
        // Ascending ingredient id
        assert_eq!(updates[0].ingredient_id, 2);
        assert_eq!(updates[1].ingredient_id, 5);
        // quantity_used sums across orders, remaining is last-write-wins
        assert_eq!(updates[1].quantity_used, 5.0);
        assert_eq!(updates[1].remaining, 5.0);
    }

    #[test]
    fn accepted_ids_preserve_submission_order() {
        let mut acc = BatchAccumulator::new();
        acc.record(accepted(7, 1.0), vec![]);
        acc.record(rejected(8, "nope"), vec![]);
        acc.record(accepted(9, 1.0), vec![]);
        assert_eq!(acc.accepted_order_ids(), &[7, 9]);
    }

    #[test]
    fn processed_orders_keep_input_order() {
        let mut acc = BatchAccumulator::new();
        acc.record(rejected(4, "a"), vec![]);
        acc.record(accepted(5, 2.0), vec![]);
        let response = acc.finish();
        let ids: Vec<i64> = response.processed_orders.iter().map(|o| o.order_id).collect();
        assert_eq!(ids, vec![4, 5]);
    }
}
