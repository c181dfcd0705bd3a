//! Inventory endpoints

use axum::extract::{Path, Query, State};
use axum::{Json, http::StatusCode};
use serde::Deserialize;

use shared::error::{AppError, ErrorCode};
use shared::models::{InventoryItem, InventoryItemDraft};
use shared::response::PaginatedResponse;

use crate::db;
use crate::db::inventory::LeftoverSort;
use crate::state::AppState;

use super::{ApiResult, internal};

/// GET /inventory
pub async fn list_inventory(State(state): State<AppState>) -> ApiResult<Vec<InventoryItem>> {
    let items = db::inventory::list_inventory(&state.pool)
        .await
        .map_err(internal)?;
    Ok(Json(items))
}

/// GET /inventory/{id}
pub async fn get_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<InventoryItem> {
    let item = db::inventory::get_inventory_item(&state.pool, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::IngredientNotFound))?;
    Ok(Json(item))
}

/// POST /inventory
pub async fn create_inventory_item(
    State(state): State<AppState>,
    Json(draft): Json<InventoryItemDraft>,
) -> Result<(StatusCode, Json<InventoryItem>), AppError> {
    if let Err(e) = draft.validate() {
        return Err(AppError::with_message(e.error_code(), e.to_string()));
    }

    let item = db::inventory::create_inventory_item(&state.pool, &draft)
        .await
        .map_err(internal)?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /inventory/{id}
pub async fn update_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<InventoryItemDraft>,
) -> Result<StatusCode, AppError> {
    if let Err(e) = draft.validate() {
        return Err(AppError::with_message(e.error_code(), e.to_string()));
    }

    let updated = db::inventory::update_inventory_item(&state.pool, id, &draft)
        .await
        .map_err(internal)?;
    if !updated {
        return Err(AppError::new(ErrorCode::IngredientNotFound));
    }
    Ok(StatusCode::OK)
}

/// DELETE /inventory/{id}
pub async fn delete_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = db::inventory::delete_inventory_item(&state.pool, id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(AppError::new(ErrorCode::IngredientNotFound));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /inventory/getLeftOvers?sortBy=price|quantity&page=N&pageSize=N
#[derive(Deserialize)]
pub struct LeftoversQuery {
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub page: Option<u32>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<u32>,
}

pub async fn get_leftovers(
    State(state): State<AppState>,
    Query(query): Query<LeftoversQuery>,
) -> ApiResult<PaginatedResponse<InventoryItem>> {
    let sort = LeftoverSort::parse(query.sort_by.as_deref()).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::InvalidSortField,
            "sortBy must be 'price' or 'quantity'",
        )
    })?;

    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(10).clamp(1, 100);

    let (items, total) = db::inventory::leftovers(&state.pool, sort, page, page_size)
        .await
        .map_err(internal)?;

    Ok(Json(PaginatedResponse::new(items, page, page_size, total)))
}
