//! Inventory database operations
//!
//! Plain CRUD plus the paginated leftovers listing. Stock decrements never
//! happen here; they go through the guarded update inside order placement.

use shared::models::{InventoryItem, InventoryItemDraft};
use sqlx::PgPool;

use super::BoxError;

/// Sort key for the leftovers listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeftoverSort {
    Price,
    Quantity,
}

impl LeftoverSort {
    /// Parse the `sortBy` query value; `None` input means the default.
    pub fn parse(value: Option<&str>) -> Option<Self> {
        match value {
            None | Some("price") => Some(Self::Price),
            Some("quantity") => Some(Self::Quantity),
            Some(_) => None,
        }
    }

    fn order_column(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Quantity => "quantity",
        }
    }
}

pub async fn list_inventory(pool: &PgPool) -> Result<Vec<InventoryItem>, BoxError> {
    let items: Vec<InventoryItem> = sqlx::query_as(
        "SELECT ingredient_id, name, quantity, unit, price FROM inventory ORDER BY ingredient_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn get_inventory_item(pool: &PgPool, id: i64) -> Result<Option<InventoryItem>, BoxError> {
    let item: Option<InventoryItem> = sqlx::query_as(
        "SELECT ingredient_id, name, quantity, unit, price FROM inventory WHERE ingredient_id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

pub async fn create_inventory_item(
    pool: &PgPool,
    draft: &InventoryItemDraft,
) -> Result<InventoryItem, BoxError> {
    let (ingredient_id,): (i64,) = sqlx::query_as(
        "INSERT INTO inventory (name, quantity, unit, price) \
         VALUES ($1, $2, $3, $4) RETURNING ingredient_id",
    )
    .bind(&draft.name)
    .bind(draft.quantity)
    .bind(&draft.unit)
    .bind(draft.price)
    .fetch_one(pool)
    .await?;

    Ok(InventoryItem {
        ingredient_id,
        name: draft.name.clone(),
        quantity: draft.quantity,
        unit: draft.unit.clone(),
        price: draft.price,
    })
}

pub async fn update_inventory_item(
    pool: &PgPool,
    id: i64,
    draft: &InventoryItemDraft,
) -> Result<bool, BoxError> {
    let rows = sqlx::query(
        "UPDATE inventory SET name = $1, quantity = $2, unit = $3, price = $4 \
         WHERE ingredient_id = $5",
    )
    .bind(&draft.name)
    .bind(draft.quantity)
    .bind(&draft.unit)
    .bind(draft.price)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn delete_inventory_item(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let rows = sqlx::query("DELETE FROM inventory WHERE ingredient_id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Page through current stock levels, sorted by price or quantity.
pub async fn leftovers(
    pool: &PgPool,
    sort: LeftoverSort,
    page: u32,
    page_size: u32,
) -> Result<(Vec<InventoryItem>, u64), BoxError> {
    let offset = i64::from(page.saturating_sub(1)) * i64::from(page_size);

    // The ORDER BY column comes from a closed enum, never from user input.
    let sql = format!(
        "SELECT ingredient_id, name, quantity, unit, price FROM inventory \
         ORDER BY {} LIMIT $1 OFFSET $2",
        sort.order_column()
    );
    let items: Vec<InventoryItem> = sqlx::query_as(&sql)
        .bind(i64::from(page_size))
        .bind(offset)
        .fetch_all(pool)
        .await?;

    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM inventory")
        .fetch_one(pool)
        .await?;

    Ok((items, total as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_parse_accepts_known_fields() {
        assert_eq!(LeftoverSort::parse(None), Some(LeftoverSort::Price));
        assert_eq!(LeftoverSort::parse(Some("price")), Some(LeftoverSort::Price));
        assert_eq!(
            LeftoverSort::parse(Some("quantity")),
            Some(LeftoverSort::Quantity)
        );
    }

    #[test]
    fn sort_parse_rejects_unknown_fields() {
        assert_eq!(LeftoverSort::parse(Some("name")), None);
        assert_eq!(LeftoverSort::parse(Some("")), None);
    }
}
