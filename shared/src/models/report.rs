//! Reporting and search response types

use serde::{Deserialize, Serialize};

/// Total number of items sold across all orders
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TotalSales {
    pub total_sales: i64,
}

/// Menu items ranked by total quantity sold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularItems {
    pub popular_items: Vec<PopularItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PopularItem {
    pub product_id: i64,
    pub name: String,
    pub description: String,
    pub quantity: i64,
    pub image: String,
}

/// Combined full-text search result over the menu and the order history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub menu_items: Vec<SearchMenuItem>,
    pub orders: Vec<SearchOrderResult>,
    pub total_matches: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SearchMenuItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub relevance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SearchOrderResult {
    pub id: i64,
    pub customer_name: String,
    /// Names of the menu items on the order
    pub items: Vec<String>,
    pub total: f64,
    pub relevance: f64,
}

/// Order counts bucketed by day of month
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrdersByDay {
    pub day: i32,
    pub orders: i64,
}

/// Order counts bucketed by month name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrdersByMonth {
    pub month: String,
    pub orders: i64,
}

/// Buckets for the ordered-items-by-period report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeriodBuckets {
    Day(Vec<OrdersByDay>),
    Month(Vec<OrdersByMonth>),
}

/// Ordered-items-by-period report envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderedItemsByPeriod {
    /// "day" or "month"
    pub period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub ordered_items: PeriodBuckets,
}
