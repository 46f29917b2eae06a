use crate::{
    catalog::MenuCatalog,
    dto::cart::{AddToCartRequest, AddToCartResponse, CartView, UpdateQuantityRequest},
    error::{AppError, AppResult},
    response::ApiResponse,
    session::SessionStore,
};
use uuid::Uuid;

pub async fn view_cart(sessions: &SessionStore, session_id: Uuid) -> ApiResponse<CartView> {
    let cart = sessions.cart(session_id).await;
    ApiResponse::ok(CartView::from(&cart))
}

pub async fn add_to_cart(
    catalog: &MenuCatalog,
    sessions: &SessionStore,
    session_id: Uuid,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<AddToCartResponse>> {
    let product = catalog
        .get(payload.product_id.trim())
        .ok_or(AppError::NotFound)?;

    let view = sessions
        .update_cart(session_id, |cart| {
            cart.add_item(product);
            CartView::from(&*cart)
        })
        .await?;
    tracing::debug!(%session_id, product_id = %product.id, "item added to cart");

    Ok(ApiResponse::success(
        "Added to cart",
        AddToCartResponse {
            cart: view,
            show_cart: true,
        },
        None,
    ))
}

pub async fn update_quantity(
    sessions: &SessionStore,
    session_id: Uuid,
    product_id: &str,
    payload: UpdateQuantityRequest,
) -> AppResult<ApiResponse<CartView>> {
    let view = sessions
        .update_cart(session_id, |cart| {
            cart.update_quantity(product_id, payload.delta);
            CartView::from(&*cart)
        })
        .await?;
    Ok(ApiResponse::success("Cart updated", view, None))
}

pub async fn clear_cart(
    sessions: &SessionStore,
    session_id: Uuid,
) -> AppResult<ApiResponse<CartView>> {
    let view = sessions
        .update_cart(session_id, |cart| {
            cart.clear();
            CartView::from(&*cart)
        })
        .await?;
    Ok(ApiResponse::success("Cart cleared", view, None))
}
