use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod doc;
pub mod health;
pub mod menu;
pub mod params;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/menu", menu::router())
        .nest("/sessions", cart::sessions_router())
        .nest("/cart", cart::router())
        .nest("/checkout", checkout::router())
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
}
