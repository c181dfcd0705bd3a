//! Order endpoints: placement, batch processing, CRUD, close, item counts

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::{Json, http::StatusCode};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use shared::error::{AppError, ErrorCode};
use shared::models::{
    BatchOrderInfo, BatchOrderInventoryUpdate, BatchOrdersResponse, Order, OrderDraft,
};

use crate::db;
use crate::db::orders::{CloseOutcome, UpdateOutcome};
use crate::services::batch;
use crate::state::AppState;

use super::{ApiResult, internal};

#[derive(Serialize)]
pub struct PlaceOrderResponse {
    pub order: BatchOrderInfo,
    pub inventory_updates: Vec<BatchOrderInventoryUpdate>,
}

/// POST /orders
///
/// Accepted orders answer 201 with the computed total and the stock each
/// ingredient lost; business rejections come back as the matching error code
/// with the human-readable reason.
pub async fn place_order(
    State(state): State<AppState>,
    Json(draft): Json<OrderDraft>,
) -> Result<(StatusCode, Json<PlaceOrderResponse>), AppError> {
    let placed = db::orders::place_order(&state.pool, &draft)
        .await
        .map_err(internal)?;

    if let Some(code) = placed.reject_code {
        return Err(AppError::with_message(code, placed.info.reason));
    }

    Ok((
        StatusCode::CREATED,
        Json(PlaceOrderResponse {
            order: placed.info,
            inventory_updates: placed.updates,
        }),
    ))
}

/// POST /orders/batch-process
#[derive(Deserialize)]
pub struct BatchOrdersRequest {
    #[serde(default)]
    pub orders: Vec<OrderDraft>,
}

pub async fn batch_process(
    State(state): State<AppState>,
    Json(request): Json<BatchOrdersRequest>,
) -> ApiResult<BatchOrdersResponse> {
    let response = batch::place_all(&state.pool, request.orders)
        .await
        .map_err(internal)?;
    Ok(Json(response))
}

/// GET /orders
pub async fn list_orders(State(state): State<AppState>) -> ApiResult<Vec<Order>> {
    let orders = db::orders::list_orders(&state.pool)
        .await
        .map_err(internal)?;
    Ok(Json(orders))
}

/// GET /orders/{id}
pub async fn get_order(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Order> {
    let order = db::orders::get_order(&state.pool, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    Ok(Json(order))
}

/// PUT /orders/{id}
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<OrderDraft>,
) -> Result<StatusCode, AppError> {
    if let Err(e) = draft.validate() {
        return Err(AppError::with_message(e.error_code(), e.to_string()));
    }

    match db::orders::update_order(&state.pool, id, &draft)
        .await
        .map_err(internal)?
    {
        UpdateOutcome::Updated => Ok(StatusCode::OK),
        UpdateOutcome::NotFound => Err(AppError::new(ErrorCode::OrderNotFound)),
        UpdateOutcome::AlreadyClosed => Err(AppError::new(ErrorCode::OrderAlreadyClosed)),
        UpdateOutcome::UnknownProduct(product_id) => Err(AppError::with_message(
            ErrorCode::MenuItemNotFound,
            format!("menu item {product_id} does not exist"),
        )),
    }
}

/// DELETE /orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = db::orders::delete_order(&state.pool, id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(AppError::new(ErrorCode::OrderNotFound));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /orders/{id}/close
pub async fn close_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    match db::orders::close_order(&state.pool, id)
        .await
        .map_err(internal)?
    {
        CloseOutcome::Closed => Ok(StatusCode::OK),
        CloseOutcome::NotFound => Err(AppError::new(ErrorCode::OrderNotFound)),
        CloseOutcome::AlreadyClosed => Err(AppError::new(ErrorCode::OrderAlreadyClosed)),
    }
}

/// GET /orders/numberOfOrderedItems?startDate=...&endDate=...
#[derive(Deserialize)]
pub struct DateRangeQuery {
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

pub async fn number_of_ordered_items(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> ApiResult<HashMap<String, i64>> {
    let start = parse_date(query.start_date.as_deref(), "startDate")?
        .unwrap_or(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default());
    let end = parse_date(query.end_date.as_deref(), "endDate")?
        .unwrap_or_else(|| Utc::now().date_naive());

    let start = start.and_time(NaiveTime::MIN).and_utc();
    let end = end.and_time(NaiveTime::MIN).and_utc();

    let items = db::orders::number_of_items(&state.pool, start, end)
        .await
        .map_err(internal)?;
    Ok(Json(items))
}

fn parse_date(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>, AppError> {
    let Some(value) = value else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| {
            AppError::with_message(ErrorCode::InvalidFormat, format!("{field} must be YYYY-MM-DD"))
        })
}
