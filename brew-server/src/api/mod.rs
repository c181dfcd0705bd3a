//! API routes for brew-server

pub mod health;
pub mod inventory;
pub mod menu;
pub mod orders;
pub mod reports;

use axum::Router;
use axum::routing::get;
use shared::error::{AppError, ErrorCode};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Map a storage failure to a generic internal error, keeping the detail in
/// the server log only.
pub(crate) fn internal(e: impl std::fmt::Display) -> AppError {
    tracing::error!("Storage error: {e}");
    AppError::new(ErrorCode::InternalError)
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let orders = Router::new()
        .route(
            "/orders",
            get(orders::list_orders).post(orders::place_order),
        )
        .route(
            "/orders/numberOfOrderedItems",
            get(orders::number_of_ordered_items),
        )
        .route("/orders/batch-process", axum::routing::post(orders::batch_process))
        .route(
            "/orders/{id}",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
        .route("/orders/{id}/close", axum::routing::post(orders::close_order));

    let menu = Router::new()
        .route("/menu", get(menu::list_menu).post(menu::create_menu_item))
        .route(
            "/menu/{id}",
            get(menu::get_menu_item)
                .put(menu::update_menu_item)
                .delete(menu::delete_menu_item),
        );

    let inventory = Router::new()
        .route(
            "/inventory",
            get(inventory::list_inventory).post(inventory::create_inventory_item),
        )
        .route("/inventory/getLeftOvers", get(inventory::get_leftovers))
        .route(
            "/inventory/{id}",
            get(inventory::get_inventory_item)
                .put(inventory::update_inventory_item)
                .delete(inventory::delete_inventory_item),
        );

    let reports = Router::new()
        .route("/reports/total-sales", get(reports::total_sales))
        .route("/reports/popular-items", get(reports::popular_items))
        .route(
            "/reports/orderedItemsByPeriod",
            get(reports::ordered_items_by_period),
        )
        .route("/reports/search", get(reports::search));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(orders)
        .merge(menu)
        .merge(inventory)
        .merge(reports)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
