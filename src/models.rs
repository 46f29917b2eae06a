use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Entrada,
    Principal,
    Bebida,
    Sobremesa,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Entrada => "entrada",
            Category::Principal => "principal",
            Category::Bebida => "bebida",
            Category::Sobremesa => "sobremesa",
        }
    }
}

/// A menu entry. Read-only; owned by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    pub image: String,
}

/// One product in a cart. `quantity` is always at least 1.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Pix,
    Credit,
    Debit,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "pix",
            PaymentMethod::Credit => "credit",
            PaymentMethod::Debit => "debit",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pix" => Ok(PaymentMethod::Pix),
            "credit" => Ok(PaymentMethod::Credit),
            "debit" => Ok(PaymentMethod::Debit),
            "cash" => Ok(PaymentMethod::Cash),
            other => Err(format!("unknown payment method {other}")),
        }
    }
}

/// Customer data collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderForm {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i64,
    pub whatsapp: String,
    pub customer_name: String,
    pub address: String,
    pub payment_method: String,
    pub total_value: Decimal,
    pub channel: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub order_id: i64,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
