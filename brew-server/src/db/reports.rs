//! Reporting and full-text search queries

use shared::models::{PopularItem, SearchMenuItem, SearchOrderResult};
use sqlx::PgPool;

use super::BoxError;

/// Total quantity of items sold across all orders.
pub async fn total_sales(pool: &PgPool) -> Result<i64, BoxError> {
    let (total,): (i64,) =
        sqlx::query_as("SELECT COALESCE(SUM(quantity), 0)::bigint FROM order_items")
            .fetch_one(pool)
            .await?;
    Ok(total)
}

/// Menu items ranked by total quantity ordered.
pub async fn popular_items(pool: &PgPool) -> Result<Vec<PopularItem>, BoxError> {
    let items: Vec<PopularItem> = sqlx::query_as(
        r#"
        SELECT oi.product_id, m.name, m.description,
               SUM(oi.quantity)::bigint AS quantity, m.image
        FROM order_items oi
        JOIN menu_items m ON oi.product_id = m.id
        GROUP BY oi.product_id, m.name, m.description, m.image
        ORDER BY quantity DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Full-text search over menu item names and descriptions, optionally
/// bounded by price.
pub async fn search_menu_items(
    pool: &PgPool,
    query: &str,
    min_price: Option<f64>,
    max_price: Option<f64>,
) -> Result<Vec<SearchMenuItem>, BoxError> {
    let mut sql = String::from(
        r#"
        SELECT id, name, description, price,
               ts_rank(to_tsvector(name || ' ' || COALESCE(description, '')),
                       websearch_to_tsquery($1))::float8 AS relevance
        FROM menu_items
        WHERE to_tsvector(name || ' ' || COALESCE(description, ''))
              @@ websearch_to_tsquery($1)
        "#,
    );
    let mut arg_index = 2;
    if min_price.is_some() {
        sql.push_str(&format!(" AND price >= ${arg_index}"));
        arg_index += 1;
    }
    if max_price.is_some() {
        sql.push_str(&format!(" AND price <= ${arg_index}"));
    }
    sql.push_str(" ORDER BY relevance DESC");

    let mut query_as = sqlx::query_as::<_, SearchMenuItem>(&sql).bind(query);
    if let Some(min) = min_price {
        query_as = query_as.bind(min);
    }
    if let Some(max) = max_price {
        query_as = query_as.bind(max);
    }

    let mut items = query_as.fetch_all(pool).await?;
    for item in &mut items {
        item.relevance = round2(item.relevance);
    }
    Ok(items)
}

/// Full-text search over orders: customer name plus the names of the menu
/// items on the order.
pub async fn search_orders(pool: &PgPool, query: &str) -> Result<Vec<SearchOrderResult>, BoxError> {
    let mut orders: Vec<SearchOrderResult> = sqlx::query_as(
        r#"
        SELECT o.id, o.customer_name,
               ARRAY_AGG(m.name) AS items,
               SUM(m.price)::float8 AS total,
               ts_rank(to_tsvector(o.customer_name || ' ' || STRING_AGG(m.name, ' ')),
                       websearch_to_tsquery($1))::float8 AS relevance
        FROM orders o
        JOIN order_items oi ON o.id = oi.order_id
        JOIN menu_items m ON oi.product_id = m.id
        GROUP BY o.id, o.customer_name
        HAVING to_tsvector(o.customer_name || ' ' || STRING_AGG(m.name, ' '))
               @@ websearch_to_tsquery($1)
        ORDER BY relevance DESC
        "#,
    )
    .bind(query)
    .fetch_all(pool)
    .await?;

    for order in &mut orders {
        order.relevance = round2(order.relevance);
    }
    Ok(orders)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn relevance_rounds_to_two_decimals() {
        assert_eq!(round2(0.060_858), 0.06);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(1.0), 1.0);
    }
}
