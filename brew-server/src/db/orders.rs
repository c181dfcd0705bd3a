//! Order database operations
//!
//! `place_order` is the fulfillment engine: one transaction that persists
//! the order, prices it against the menu, aggregates the ingredient
//! requirements and reserves stock with guarded decrements. Everything
//! commits together or not at all.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use shared::error::ErrorCode;
use shared::models::{
    BatchOrderInfo, BatchOrderInventoryUpdate, BatchOrderStatus, Order, OrderDraft, OrderItem,
    OrderStatus, OrdersByDay, OrdersByMonth,
};
use sqlx::PgPool;

use super::BoxError;

/// Result of running one order through the fulfillment engine.
///
/// A rejection is a normal outcome, not an error: `info.status` carries the
/// verdict and `reject_code` the matching error code for callers that
/// surface a single order over HTTP.
pub struct PlacedOrder {
    pub info: BatchOrderInfo,
    pub updates: Vec<BatchOrderInventoryUpdate>,
    pub reject_code: Option<ErrorCode>,
}

impl PlacedOrder {
    fn rejected(info: BatchOrderInfo, code: ErrorCode) -> Self {
        Self {
            info,
            updates: Vec::new(),
            reject_code: Some(code),
        }
    }
}

/// Outcome of an order update attempt
#[derive(Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
    AlreadyClosed,
    UnknownProduct(i64),
}

/// Outcome of a close attempt
#[derive(Debug, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    NotFound,
    AlreadyClosed,
}

/// Validate, price and persist one order, reserving ingredient stock.
///
/// Everything after validation runs in a single transaction; any rejection
/// rolls the whole attempt back, so a rejected order leaves no trace in
/// storage.
pub async fn place_order(pool: &PgPool, draft: &OrderDraft) -> Result<PlacedOrder, BoxError> {
    let mut info = BatchOrderInfo {
        order_id: 0,
        customer_name: draft.customer_name.clone(),
        status: BatchOrderStatus::Rejected,
        reason: String::new(),
        total: 0.0,
    };

    // Validation runs before any transaction is opened.
    if let Err(e) = draft.validate() {
        info.reason = e.to_string();
        return Ok(PlacedOrder::rejected(info, e.error_code()));
    }
    let items = draft.items.as_deref().unwrap_or_default();

    let mut tx = pool.begin().await.map_err(|e| format!("begin transaction: {e}"))?;

    let (order_id,): (i64,) =
        sqlx::query_as("INSERT INTO orders (customer_name, notes) VALUES ($1, $2) RETURNING id")
            .bind(&draft.customer_name)
            .bind(draft.notes.clone().unwrap_or(serde_json::Value::Null))
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| format!("insert order header: {e}"))?;
    info.order_id = order_id;

    let mut total = 0.0;
    let mut required: BTreeMap<i64, f64> = BTreeMap::new();

    for item in items {
        let price: Option<f64> = sqlx::query_scalar("SELECT price FROM menu_items WHERE id = $1")
            .bind(item.product_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| format!("look up menu price: {e}"))?;
        let Some(price) = price else {
            info.reason = format!("menu item {} does not exist", item.product_id);
            return Ok(PlacedOrder::rejected(info, ErrorCode::MenuItemNotFound));
        };
        total += price * f64::from(item.quantity);

        // The same product listed twice merges into one row.
        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (order_id, product_id)
            DO UPDATE SET quantity = order_items.quantity + EXCLUDED.quantity
            "#,
        )
        .bind(order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .execute(&mut *tx)
        .await
        .map_err(|e| format!("insert order item: {e}"))?;

        let recipe: Vec<(i64, f64)> = sqlx::query_as(
            "SELECT ingredient_id, quantity FROM menu_item_ingredients WHERE menu_id = $1",
        )
        .bind(item.product_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| format!("look up recipe: {e}"))?;
        accumulate_requirements(&mut required, &recipe, item.quantity);
    }

    // BTreeMap iterates ascending by ingredient id, so when several
    // ingredients are short the lowest id is the one reported.
    let mut updates = Vec::with_capacity(required.len());
    for (&ingredient_id, &amount) in &required {
        // The sufficiency check and the decrement are one statement; the
        // predicate is re-evaluated under the row lock, keeping stock
        // non-negative under concurrent placements.
        let row: Option<(String, f64)> = sqlx::query_as(
            r#"
            UPDATE inventory
            SET quantity = quantity - $1
            WHERE ingredient_id = $2 AND quantity >= $1
            RETURNING name, quantity
            "#,
        )
        .bind(amount)
        .bind(ingredient_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| format!("reserve inventory: {e}"))?;

        let Some((name, remaining)) = row else {
            let current: Option<(String, f64)> =
                sqlx::query_as("SELECT name, quantity FROM inventory WHERE ingredient_id = $1")
                    .bind(ingredient_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| format!("check inventory: {e}"))?;
            // Dropping the transaction rolls back the order and any
            // decrements already applied.
            return Ok(match current {
                Some((name, available)) => {
                    info.reason = format!(
                        "insufficient inventory: {name} (ingredient {ingredient_id}), \
                         required {amount}, available {available}"
                    );
                    PlacedOrder::rejected(info, ErrorCode::InsufficientInventory)
                }
                None => {
                    info.reason = format!("ingredient {ingredient_id} does not exist in inventory");
                    PlacedOrder::rejected(info, ErrorCode::IngredientNotFound)
                }
            });
        };

        updates.push(BatchOrderInventoryUpdate {
            ingredient_id,
            name,
            quantity_used: amount,
            remaining,
        });
    }

    tx.commit()
        .await
        .map_err(|e| format!("commit transaction: {e}"))?;

    info.status = BatchOrderStatus::Accepted;
    info.reason = "OK".to_string();
    info.total = total;
    Ok(PlacedOrder {
        info,
        updates,
        reject_code: None,
    })
}

/// Fold one line item's recipe into the per-ingredient requirement map.
fn accumulate_requirements(
    required: &mut BTreeMap<i64, f64>,
    recipe: &[(i64, f64)],
    quantity: i32,
) {
    for &(ingredient_id, per_unit) in recipe {
        *required.entry(ingredient_id).or_insert(0.0) += per_unit * f64::from(quantity);
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_name: String,
    status: String,
    notes: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Result<Order, BoxError> {
        Ok(Order {
            id: self.id,
            customer_name: self.customer_name,
            status: self.status.parse::<OrderStatus>()?,
            notes: self.notes,
            created_at: self.created_at,
            items,
        })
    }
}

pub async fn list_orders(pool: &PgPool) -> Result<Vec<Order>, BoxError> {
    let rows: Vec<OrderRow> = sqlx::query_as(
        "SELECT id, customer_name, status, notes, created_at FROM orders ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    if rows.is_empty() {
        return Ok(vec![]);
    }

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let item_rows: Vec<(i64, i64, i32)> = sqlx::query_as(
        "SELECT order_id, product_id, quantity FROM order_items \
         WHERE order_id = ANY($1) ORDER BY product_id",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut item_map: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for (order_id, product_id, quantity) in item_rows {
        item_map.entry(order_id).or_default().push(OrderItem {
            product_id,
            quantity,
        });
    }

    rows.into_iter()
        .map(|r| {
            let items = item_map.remove(&r.id).unwrap_or_default();
            r.into_order(items)
        })
        .collect()
}

pub async fn get_order(pool: &PgPool, id: i64) -> Result<Option<Order>, BoxError> {
    let row: Option<OrderRow> = sqlx::query_as(
        "SELECT id, customer_name, status, notes, created_at FROM orders WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    let Some(row) = row else {
        return Ok(None);
    };

    let items: Vec<(i64, i32)> = sqlx::query_as(
        "SELECT product_id, quantity FROM order_items WHERE order_id = $1 ORDER BY product_id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;
    let items = items
        .into_iter()
        .map(|(product_id, quantity)| OrderItem {
            product_id,
            quantity,
        })
        .collect();

    Ok(Some(row.into_order(items)?))
}

/// Replace an open order's customer name, notes and line items.
///
/// Closed orders are immutable; the status check and the rewrite happen
/// under one transaction with the order row locked.
pub async fn update_order(
    pool: &PgPool,
    id: i64,
    draft: &OrderDraft,
) -> Result<UpdateOutcome, BoxError> {
    let items = draft.items.as_deref().unwrap_or_default();

    let mut tx = pool.begin().await?;

    let status: Option<String> =
        sqlx::query_scalar("SELECT status FROM orders WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    let Some(status) = status else {
        return Ok(UpdateOutcome::NotFound);
    };
    if status.parse::<OrderStatus>()? == OrderStatus::Closed {
        return Ok(UpdateOutcome::AlreadyClosed);
    }

    for item in items {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM menu_items WHERE id = $1")
            .bind(item.product_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Ok(UpdateOutcome::UnknownProduct(item.product_id));
        }
    }

    sqlx::query("UPDATE orders SET customer_name = $1, notes = COALESCE($2, notes) WHERE id = $3")
        .bind(&draft.customer_name)
        .bind(draft.notes.clone())
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM order_items WHERE order_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    for item in items {
        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (order_id, product_id)
            DO UPDATE SET quantity = order_items.quantity + EXCLUDED.quantity
            "#,
        )
        .bind(id)
        .bind(item.product_id)
        .bind(item.quantity)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(UpdateOutcome::Updated)
}

/// Delete an order; line items go with it via the FK cascade.
pub async fn delete_order(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let rows = sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Transition an order to closed. Closing is one-way and idempotence is
/// rejected: closing a closed order reports `AlreadyClosed`.
pub async fn close_order(pool: &PgPool, id: i64) -> Result<CloseOutcome, BoxError> {
    let status: Option<String> = sqlx::query_scalar("SELECT status FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    let Some(status) = status else {
        return Ok(CloseOutcome::NotFound);
    };
    if status.parse::<OrderStatus>()? == OrderStatus::Closed {
        return Ok(CloseOutcome::AlreadyClosed);
    }

    sqlx::query("UPDATE orders SET status = 'closed' WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(CloseOutcome::Closed)
}

/// Quantity sold per menu item over closed orders in a date range.
pub async fn number_of_items(
    pool: &PgPool,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<HashMap<String, i64>, BoxError> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT m.name, COALESCE(SUM(oi.quantity), 0)::bigint AS total_quantity
        FROM menu_items m
        JOIN order_items oi ON m.id = oi.product_id
        JOIN orders o ON oi.order_id = o.id
        WHERE o.created_at BETWEEN $1 AND $2 AND o.status = 'closed'
        GROUP BY m.name
        ORDER BY total_quantity DESC
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}

/// Order counts per day of month, optionally scoped to a year.
pub async fn ordered_items_by_day(
    pool: &PgPool,
    month: u32,
    year: Option<i32>,
) -> Result<Vec<OrdersByDay>, BoxError> {
    let rows: Vec<OrdersByDay> = if let Some(year) = year {
        sqlx::query_as(
            r#"
            SELECT EXTRACT(DAY FROM created_at)::int AS day, COUNT(*) AS orders
            FROM orders
            WHERE EXTRACT(MONTH FROM created_at) = $1
              AND EXTRACT(YEAR FROM created_at) = $2
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(i32::try_from(month)?)
        .bind(year)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as(
            r#"
            SELECT EXTRACT(DAY FROM created_at)::int AS day, COUNT(*) AS orders
            FROM orders
            WHERE EXTRACT(MONTH FROM created_at) = $1
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(i32::try_from(month)?)
        .fetch_all(pool)
        .await?
    };
    Ok(rows)
}

/// Closed-order counts per month name for a year.
pub async fn ordered_items_by_month(
    pool: &PgPool,
    year: i32,
) -> Result<Vec<OrdersByMonth>, BoxError> {
    let rows: Vec<OrdersByMonth> = sqlx::query_as(
        r#"
        SELECT TRIM(TO_CHAR(created_at, 'Month')) AS month, COUNT(id) AS orders
        FROM orders
        WHERE EXTRACT(YEAR FROM created_at) = $1 AND status = 'closed'
        GROUP BY TRIM(TO_CHAR(created_at, 'Month')), EXTRACT(MONTH FROM created_at)
        ORDER BY EXTRACT(MONTH FROM created_at)
        "#,
    )
    .bind(year)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requirements_accumulate_across_items() {
        let mut required = BTreeMap::new();
        // Two lattes: 0.03 beans + 0.2 milk each
        accumulate_requirements(&mut required, &[(1, 0.03), (2, 0.2)], 2);
        // One espresso: beans only
        accumulate_requirements(&mut required, &[(1, 0.02)], 1);

        assert_eq!(required.len(), 2);
        assert!((required[&1] - 0.08).abs() < 1e-9);
        assert!((required[&2] - 0.4).abs() < 1e-9);
    }

    #[test]
    fn requirements_iterate_ascending_by_ingredient_id() {
        let mut required = BTreeMap::new();
        accumulate_requirements(&mut required, &[(9, 1.0), (3, 1.0), (7, 1.0)], 1);
        let ids: Vec<i64> = required.keys().copied().collect();
        assert_eq!(ids, vec![3, 7, 9]);
    }

    #[test]
    fn empty_recipe_adds_nothing() {
        let mut required = BTreeMap::new();
        accumulate_requirements(&mut required, &[], 5);
        assert!(required.is_empty());
    }
}
