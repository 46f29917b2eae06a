use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::{AppResult, CheckoutFailure},
    middleware::session::CartSession,
    models::OrderForm,
    response::ApiResponse,
    services::checkout_service::CheckoutReceipt,
    session::CheckoutStatus,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(checkout_status).post(checkout))
}

#[utoipa::path(
    post,
    path = "/api/checkout",
    params(
        ("x-session-id" = String, Header, description = "Cart session id")
    ),
    request_body = OrderForm,
    responses(
        (status = 200, description = "Order saved and confirmation sent", body = ApiResponse<CheckoutReceipt>),
        (status = 400, description = "Empty cart or missing customer data", body = ApiResponse<CheckoutFailure>),
        (status = 409, description = "A checkout is already running for this session", body = ApiResponse<CheckoutFailure>),
        (status = 500, description = "Order could not be saved", body = ApiResponse<CheckoutFailure>),
        (status = 502, description = "Order saved, confirmation not sent", body = ApiResponse<CheckoutFailure>),
    ),
    tag = "Checkout"
)]
pub async fn checkout(
    State(state): State<AppState>,
    CartSession(session_id): CartSession,
    Json(form): Json<OrderForm>,
) -> AppResult<Json<ApiResponse<CheckoutReceipt>>> {
    let receipt = state
        .checkout
        .submit(&state.sessions, session_id, form)
        .await?;
    let message = receipt.message.clone();
    Ok(Json(ApiResponse::success(message, receipt, None)))
}

#[utoipa::path(
    get,
    path = "/api/checkout",
    params(
        ("x-session-id" = String, Header, description = "Cart session id")
    ),
    responses(
        (status = 200, description = "State of the latest checkout", body = ApiResponse<CheckoutStatus>)
    ),
    tag = "Checkout"
)]
pub async fn checkout_status(
    State(state): State<AppState>,
    CartSession(session_id): CartSession,
) -> Json<ApiResponse<CheckoutStatus>> {
    Json(ApiResponse::ok(state.sessions.status(session_id).await))
}
