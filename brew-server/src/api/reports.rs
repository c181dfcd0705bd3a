//! Reporting and search endpoints

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use shared::error::{AppError, ErrorCode};
use shared::models::{
    OrderedItemsByPeriod, PeriodBuckets, PopularItems, SearchResult, TotalSales,
};

use crate::db;
use crate::state::AppState;

use super::{ApiResult, internal};

/// GET /reports/total-sales
pub async fn total_sales(State(state): State<AppState>) -> ApiResult<TotalSales> {
    let total = db::reports::total_sales(&state.pool)
        .await
        .map_err(internal)?;
    Ok(Json(TotalSales { total_sales: total }))
}

/// GET /reports/popular-items
pub async fn popular_items(State(state): State<AppState>) -> ApiResult<PopularItems> {
    let items = db::reports::popular_items(&state.pool)
        .await
        .map_err(internal)?;
    Ok(Json(PopularItems {
        popular_items: items,
    }))
}

/// GET /reports/orderedItemsByPeriod?period=day&month=october[&year=2025]
/// GET /reports/orderedItemsByPeriod?period=month&year=2025
#[derive(Deserialize)]
pub struct PeriodQuery {
    pub period: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
}

pub async fn ordered_items_by_period(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<OrderedItemsByPeriod> {
    let period = query
        .period
        .as_deref()
        .ok_or_else(|| AppError::with_message(ErrorCode::RequiredField, "period is required"))?;

    match period {
        "day" => {
            let month_name = query.month.as_deref().ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::RequiredField,
                    "period equal to 'day', but month not provided",
                )
            })?;
            let month = month_number(month_name).ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::InvalidRequest,
                    format!("{month_name}, month does not exist"),
                )
            })?;
            let year = query
                .year
                .as_deref()
                .map(|y| {
                    y.parse::<i32>().map_err(|_| {
                        AppError::with_message(ErrorCode::InvalidFormat, "year must be a number")
                    })
                })
                .transpose()?;

            let buckets = db::orders::ordered_items_by_day(&state.pool, month, year)
                .await
                .map_err(internal)?;
            Ok(Json(OrderedItemsByPeriod {
                period: "day".to_string(),
                month: Some(month),
                year,
                ordered_items: PeriodBuckets::Day(buckets),
            }))
        }
        "month" => {
            let year = query
                .year
                .as_deref()
                .ok_or_else(|| {
                    AppError::with_message(
                        ErrorCode::RequiredField,
                        "period equal to 'month', but year not provided",
                    )
                })?
                .parse::<i32>()
                .map_err(|_| {
                    AppError::with_message(ErrorCode::InvalidFormat, "year must be a number")
                })?;

            let buckets = db::orders::ordered_items_by_month(&state.pool, year)
                .await
                .map_err(internal)?;
            Ok(Json(OrderedItemsByPeriod {
                period: "month".to_string(),
                month: None,
                year: Some(year),
                ordered_items: PeriodBuckets::Month(buckets),
            }))
        }
        _ => Err(AppError::with_message(
            ErrorCode::InvalidRequest,
            "invalid period value, must be 'day' or 'month'",
        )),
    }
}

/// GET /reports/search?q=...&filter=orders,menu&minPrice=...&maxPrice=...
#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub filter: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<f64>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<f64>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<SearchResult> {
    let q = query
        .q
        .as_deref()
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::RequiredField, "search query string is required")
        })?;

    if query.min_price.is_some_and(|p| p < 0.0) || query.max_price.is_some_and(|p| p < 0.0) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "minPrice and maxPrice must be positive",
        ));
    }

    let (include_orders, include_menu) = parse_search_filter(query.filter.as_deref())?;

    let menu_items = if include_menu {
        db::reports::search_menu_items(&state.pool, q, query.min_price, query.max_price)
            .await
            .map_err(internal)?
    } else {
        vec![]
    };

    let orders = if include_orders {
        db::reports::search_orders(&state.pool, q)
            .await
            .map_err(internal)?
    } else {
        vec![]
    };

    let total_matches = menu_items.len() + orders.len();
    Ok(Json(SearchResult {
        menu_items,
        orders,
        total_matches,
    }))
}

/// Parse the `filter` parameter into (orders, menu) inclusion flags.
/// No filter means search everything.
fn parse_search_filter(filter: Option<&str>) -> Result<(bool, bool), AppError> {
    let Some(filter) = filter else {
        return Ok((true, true));
    };

    let mut include_orders = false;
    let mut include_menu = false;
    for part in filter.split(',') {
        match part.trim() {
            "orders" => include_orders = true,
            "menu" => include_menu = true,
            "all" => {
                include_orders = true;
                include_menu = true;
            }
            _ => {
                return Err(AppError::with_message(
                    ErrorCode::InvalidRequest,
                    "no such filter. Available filters: orders, menu, all",
                ));
            }
        }
    }
    Ok((include_orders, include_menu))
}

/// Map an English month name to its number.
fn month_number(month: &str) -> Option<u32> {
    let n = match month.to_ascii_lowercase().as_str() {
        "january" => 1,
        "february" => 2,
        "march" => 3,
        "april" => 4,
        "may" => 5,
        "june" => 6,
        "july" => 7,
        "august" => 8,
        "september" => 9,
        "october" => 10,
        "november" => 11,
        "december" => 12,
        _ => return None,
    };
    Some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_map_to_numbers() {
        assert_eq!(month_number("january"), Some(1));
        assert_eq!(month_number("October"), Some(10));
        assert_eq!(month_number("DECEMBER"), Some(12));
        assert_eq!(month_number("smarch"), None);
    }

    #[test]
    fn default_filter_searches_everything() {
        assert_eq!(parse_search_filter(None).unwrap(), (true, true));
        assert_eq!(parse_search_filter(Some("all")).unwrap(), (true, true));
    }

    #[test]
    fn filters_select_individual_domains() {
        assert_eq!(parse_search_filter(Some("orders")).unwrap(), (true, false));
        assert_eq!(parse_search_filter(Some("menu")).unwrap(), (false, true));
        assert_eq!(
            parse_search_filter(Some("orders,menu")).unwrap(),
            (true, true)
        );
    }

    #[test]
    fn unknown_filter_is_rejected() {
        assert!(parse_search_filter(Some("desserts")).is_err());
    }
}
