//! Menu catalog endpoints

use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};

use shared::error::{AppError, ErrorCode};
use shared::models::{MenuItem, MenuItemDraft};

use crate::db;
use crate::db::menu::MenuWriteOutcome;
use crate::state::AppState;

use super::{ApiResult, internal};

/// GET /menu
pub async fn list_menu(State(state): State<AppState>) -> ApiResult<Vec<MenuItem>> {
    let items = db::menu::list_menu_items(&state.pool)
        .await
        .map_err(internal)?;
    Ok(Json(items))
}

/// GET /menu/{id}
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<MenuItem> {
    let item = db::menu::get_menu_item(&state.pool, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;
    Ok(Json(item))
}

/// POST /menu
pub async fn create_menu_item(
    State(state): State<AppState>,
    Json(draft): Json<MenuItemDraft>,
) -> Result<(StatusCode, Json<MenuItem>), AppError> {
    if let Err(e) = draft.validate() {
        return Err(AppError::with_message(e.error_code(), e.to_string()));
    }

    match db::menu::create_menu_item(&state.pool, &draft)
        .await
        .map_err(internal)?
    {
        MenuWriteOutcome::Done(item) => Ok((StatusCode::CREATED, Json(item))),
        MenuWriteOutcome::UnknownIngredient(id) => Err(unknown_ingredient(id)),
        MenuWriteOutcome::NotFound => Err(AppError::new(ErrorCode::MenuItemNotFound)),
    }
}

/// PUT /menu/{id}
pub async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<MenuItemDraft>,
) -> ApiResult<MenuItem> {
    if let Err(e) = draft.validate() {
        return Err(AppError::with_message(e.error_code(), e.to_string()));
    }

    match db::menu::update_menu_item(&state.pool, id, &draft)
        .await
        .map_err(internal)?
    {
        MenuWriteOutcome::Done(item) => Ok(Json(item)),
        MenuWriteOutcome::NotFound => Err(AppError::new(ErrorCode::MenuItemNotFound)),
        MenuWriteOutcome::UnknownIngredient(unknown) => Err(unknown_ingredient(unknown)),
    }
}

/// DELETE /menu/{id}
pub async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = db::menu::delete_menu_item(&state.pool, id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(AppError::new(ErrorCode::MenuItemNotFound));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn unknown_ingredient(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::RecipeIngredientUnknown,
        format!("ingredient {id} does not exist in inventory"),
    )
}
