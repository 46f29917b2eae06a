//! Turns a cart snapshot and the checkout form into the records to persist and
//! the message that goes out with the notification.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    cart::Cart,
    error::ValidationError,
    models::{CartLine, OrderForm, PaymentMethod},
    services::notifier::{CustomerInfo, OrderDetails, OrderNotification},
};

pub const ORDER_CHANNEL: &str = "site";

const SUMMARY_TITLE: &str = "*NOVO PEDIDO - SRA GASTRONOMIA* 🍽️";

/// Order header as it will be inserted; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub whatsapp: String,
    pub customer_name: String,
    pub address: String,
    pub payment_method: PaymentMethod,
    pub total_value: Decimal,
    pub channel: &'static str,
    pub created_at: DateTime<Utc>,
}

/// One line item, priced from the cart snapshot rather than the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone)]
pub struct AssembledOrder {
    pub order: NewOrder,
    pub items: Vec<NewOrderItem>,
    pub summary: String,
    customer: CustomerInfo,
    lines: Vec<CartLine>,
}

impl AssembledOrder {
    /// Notification payload for the order once its id is known.
    pub fn notification(&self, order_id: i64) -> OrderNotification {
        OrderNotification {
            customer: self.customer.clone(),
            order: OrderDetails {
                items: self.lines.clone(),
                total: self.order.total_value,
                payment: self.order.payment_method,
            },
            order_id,
        }
    }
}

pub fn assemble(cart: &Cart, form: &OrderForm) -> Result<AssembledOrder, ValidationError> {
    if cart.is_empty() {
        return Err(ValidationError::EmptyCart);
    }
    let name = required(&form.name, "name")?;
    let phone = required(&form.phone, "phone")?;
    let address = required(&form.address, "address")?;

    let items = cart
        .lines()
        .iter()
        .map(|line| {
            let quantity = i32::try_from(line.quantity)
                .map_err(|_| ValidationError::QuantityOutOfRange(line.product.id.clone()))?;
            Ok(NewOrderItem {
                product_name: line.product.name.clone(),
                unit_price: line.product.price,
                quantity,
                subtotal: line.subtotal(),
            })
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    let total = cart.total();
    let customer = CustomerInfo {
        name: name.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
    };
    let summary = summary_text(&customer, form.payment_method, cart.lines(), total);

    Ok(AssembledOrder {
        order: NewOrder {
            whatsapp: customer.phone.clone(),
            customer_name: customer.name.clone(),
            address: customer.address.clone(),
            payment_method: form.payment_method,
            total_value: total,
            channel: ORDER_CHANNEL,
            created_at: Utc::now(),
        },
        items,
        summary,
        customer,
        lines: cart.lines().to_vec(),
    })
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(value)
}

fn summary_text(
    customer: &CustomerInfo,
    payment: PaymentMethod,
    lines: &[CartLine],
    total: Decimal,
) -> String {
    let items = lines
        .iter()
        .map(|l| format!("• {}x {}", l.quantity, l.product.name))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{SUMMARY_TITLE}\n\n\
         *Cliente:* {}\n\
         *WhatsApp:* {}\n\
         *Endereço:* {}\n\
         *Pagamento:* {}\n\n\
         *Pedido:*\n{items}\n\n\
         *Total: R$ {:.2}*",
        customer.name,
        customer.phone,
        customer.address,
        payment.as_str().to_uppercase(),
        total.round_dp(2),
    )
}
