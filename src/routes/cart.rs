use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
};

use crate::{
    dto::cart::{
        AddToCartRequest, AddToCartResponse, CartView, SessionCreated, UpdateQuantityRequest,
    },
    error::AppResult,
    middleware::session::CartSession,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_cart).delete(clear_cart))
        .route("/items", post(add_to_cart))
        .route("/items/{product_id}", patch(update_quantity))
}

pub fn sessions_router() -> Router<AppState> {
    Router::new().route("/", post(create_session))
}

#[utoipa::path(
    post,
    path = "/api/sessions",
    responses(
        (status = 201, description = "Open a new cart session", body = ApiResponse<SessionCreated>)
    ),
    tag = "Cart"
)]
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<SessionCreated>>) {
    let session_id = state.sessions.create().await;
    (
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Session created",
            SessionCreated { session_id },
            None,
        )),
    )
}

#[utoipa::path(
    get,
    path = "/api/cart",
    params(
        ("x-session-id" = String, Header, description = "Cart session id")
    ),
    responses(
        (status = 200, description = "Current cart", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn view_cart(
    State(state): State<AppState>,
    CartSession(session_id): CartSession,
) -> Json<ApiResponse<CartView>> {
    Json(cart_service::view_cart(&state.sessions, session_id).await)
}

#[utoipa::path(
    post,
    path = "/api/cart/items",
    params(
        ("x-session-id" = String, Header, description = "Cart session id")
    ),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Add one unit of a product", body = ApiResponse<AddToCartResponse>),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Checkout in progress"),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    CartSession(session_id): CartSession,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<AddToCartResponse>>> {
    let resp =
        cart_service::add_to_cart(&state.catalog, &state.sessions, session_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/cart/items/{product_id}",
    params(
        ("x-session-id" = String, Header, description = "Cart session id"),
        ("product_id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Change a line quantity; lines reaching zero are removed", body = ApiResponse<CartView>),
        (status = 409, description = "Checkout in progress"),
    ),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    CartSession(session_id): CartSession,
    Path(product_id): Path<String>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp =
        cart_service::update_quantity(&state.sessions, session_id, &product_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    params(
        ("x-session-id" = String, Header, description = "Cart session id")
    ),
    responses(
        (status = 200, description = "Empty the cart", body = ApiResponse<CartView>),
        (status = 409, description = "Checkout in progress"),
    ),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    CartSession(session_id): CartSession,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::clear_cart(&state.sessions, session_id).await?;
    Ok(Json(resp))
}
