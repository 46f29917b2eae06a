use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{cart::Cart, models::CartLine};

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    pub delta: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub item_count: u64,
    pub total: Decimal,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().to_vec(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddToCartResponse {
    #[serde(flatten)]
    pub cart: CartView,
    /// Tells the client to open the cart drawer.
    pub show_cart: bool,
}
