use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::MenuQuery,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_menu))
        .route("/{id}", get(get_menu_item))
}

#[utoipa::path(
    get,
    path = "/api/menu",
    params(MenuQuery),
    responses(
        (status = 200, description = "List menu items", body = ApiResponse<Vec<Product>>)
    ),
    tag = "Menu"
)]
pub async fn list_menu(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Json<ApiResponse<Vec<Product>>> {
    let items = state.catalog.list(query.category);
    let meta = Meta::all(items.len());
    Json(ApiResponse::success("Menu", items, Some(meta)))
}

#[utoipa::path(
    get,
    path = "/api/menu/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get menu item", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Menu"
)]
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let product = state.catalog.get(&id).cloned().ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success("Product", product, None)))
}
